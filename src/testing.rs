use crate::shapes::FIELD_SEPARATOR;

/// Splits a record into its fields.
pub fn record_fields(record: &str) -> Vec<&str> {
    record
        .split(FIELD_SEPARATOR)
        .collect()
}

/// The record kind, e.g. `TRACK`, `ARC`, `HOLE`.
pub fn record_kind(record: &str) -> &str {
    record_fields(record)
        .first()
        .copied()
        .unwrap_or_default()
}

/// Parses the space separated `x y` pairs of a `TRACK` record.
pub fn track_points(record: &str) -> Vec<(f64, f64)> {
    let fields = record_fields(record);
    assert_eq!(fields[0], "TRACK", "not a track record: {}", record);

    let values = fields[4]
        .split(' ')
        .map(|value| value.parse::<f64>().expect("Could not parse coordinate"))
        .collect::<Vec<_>>();

    values
        .chunks(2)
        .map(|pair| (pair[0], pair[1]))
        .collect()
}

/// Replaces the id field of a record so records can be compared regardless of the id source.
pub fn without_id(record: &str) -> String {
    let mut fields = record_fields(record);
    let id_index = match fields[0] {
        "TRACK" | "ARC" => Some(5),
        "HOLE" => Some(4),
        "VIA" => Some(6),
        _ => None,
    };
    if let Some(index) = id_index {
        fields[index] = "<id>";
    }
    fields.join("~")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_track_points() {
        assert_eq!(
            track_points("TRACK~1~1~~0 -0 10 -10~gge1~0"),
            vec![(0.0, -0.0), (10.0, -10.0)]
        );
    }

    #[test]
    fn test_without_id() {
        assert_eq!(without_id("HOLE~0~-0~1~gge123~0"), "HOLE~0~-0~1~<id>~0");
        assert_eq!(without_id("VIA~0~-0~1~GND~0.5~gge9~1"), "VIA~0~-0~1~GND~0.5~<id>~1");
        assert_eq!(record_kind("TEXT~L~0~0~0.8~0~none~3~~8~A~"), "TEXT");
    }
}
