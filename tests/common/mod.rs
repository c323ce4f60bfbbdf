//! DXF reading helpers shared by the integration tests
#![allow(dead_code)]

use glam::{DVec2, dvec2};

/// One `0 <TYPE>` record and the group pairs that follow it
#[derive(Debug, Clone)]
pub struct Record {
    pub kind: String,
    pub groups: Vec<(i32, String)>,
}

impl Record {
    pub fn text(&self, code: i32) -> Option<&str> {
        self.groups
            .iter()
            .find(|(c, _)| *c == code)
            .map(|(_, v)| v.as_str())
    }

    pub fn num(&self, code: i32) -> f64 {
        self.text(code)
            .unwrap_or_else(|| panic!("{} has no group {code}", self.kind))
            .parse()
            .unwrap_or_else(|e| panic!("{} group {code}: {e}", self.kind))
    }

    pub fn point(&self, code: i32) -> DVec2 {
        dvec2(self.num(code), self.num(code + 10))
    }

    pub fn layer(&self) -> &str {
        self.text(8).unwrap_or_default()
    }

    pub fn color(&self) -> i32 {
        self.num(62) as i32
    }
}

/// Split a DXF document into (code, value) pairs
pub fn pairs(dxf: &str) -> Result<Vec<(i32, String)>, String> {
    let lines: Vec<&str> = dxf.lines().collect();
    if lines.len() % 2 != 0 {
        return Err(format!("odd number of lines: {}", lines.len()));
    }
    lines
        .chunks(2)
        .map(|pair| {
            let code = pair[0]
                .trim()
                .parse::<i32>()
                .map_err(|e| format!("bad group code {:?}: {e}", pair[0]))?;
            Ok((code, pair[1].to_string()))
        })
        .collect()
}

/// Records of the ENTITIES section
pub fn entities(dxf: &str) -> Vec<Record> {
    let pairs = pairs(dxf).expect("valid group pairs");
    let start = pairs
        .windows(2)
        .position(|w| w[0] == (0, "SECTION".into()) && w[1] == (2, "ENTITIES".into()))
        .expect("ENTITIES section")
        + 2;

    let mut records: Vec<Record> = Vec::new();
    for (code, value) in &pairs[start..] {
        if *code == 0 {
            if value == "ENDSEC" {
                break;
            }
            records.push(Record {
                kind: value.clone(),
                groups: Vec::new(),
            });
        } else if let Some(last) = records.last_mut() {
            last.groups.push((*code, value.clone()));
        }
    }
    records
}

pub fn of_kind<'a>(records: &'a [Record], kind: &str) -> Vec<&'a Record> {
    records.iter().filter(|r| r.kind == kind).collect()
}

/// Text of the ENTITIES section body, for snapshots
pub fn entities_text(dxf: &str) -> String {
    let body = dxf
        .split_once("2\nENTITIES\n")
        .map(|(_, rest)| rest)
        .unwrap_or_default();
    let end = body.rfind("0\nENDSEC\n").unwrap_or(body.len());
    body[..end].trim_end().to_string()
}

pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-4,
        "expected {expected}, got {actual}"
    );
}

pub fn assert_point(actual: DVec2, expected: DVec2) {
    assert!(
        actual.distance(expected) < 1e-4,
        "expected {expected}, got {actual}"
    );
}

const LAYERS: [&str; 8] = [
    "0", "COLOR_1", "COLOR_2", "COLOR_3", "COLOR_4", "COLOR_5", "COLOR_6", "COLOR_7",
];

/// Structural checks every produced document must pass
pub fn validate(dxf: &str) -> Result<(), String> {
    let pairs = pairs(dxf)?;

    let sections: Vec<&str> = pairs
        .windows(2)
        .filter(|w| w[0] == (0, "SECTION".into()))
        .map(|w| w[1].1.as_str())
        .collect();
    if sections != ["HEADER", "TABLES", "ENTITIES"] {
        return Err(format!("unexpected sections {sections:?}"));
    }
    if pairs.last() != Some(&(0, "EOF".to_string())) {
        return Err("document does not end with EOF".into());
    }
    if !pairs.contains(&(1, "AC1009".to_string())) {
        return Err("missing $ACADVER AC1009".into());
    }
    for layer in LAYERS {
        if !pairs.contains(&(2, layer.to_string())) {
            return Err(format!("layer {layer} not declared"));
        }
    }

    for record in entities(dxf) {
        if !matches!(record.kind.as_str(), "LINE" | "ARC" | "CIRCLE") {
            return Err(format!("unexpected entity {}", record.kind));
        }
        if !LAYERS.contains(&record.layer()) {
            return Err(format!("unknown layer {:?}", record.layer()));
        }
        if !(1..=7).contains(&record.color()) {
            return Err(format!("color {} out of range", record.color()));
        }
        for (code, value) in &record.groups {
            if (10..=51).contains(code) {
                let v: f64 = value
                    .parse()
                    .map_err(|e| format!("group {code} value {value:?}: {e}"))?;
                if !v.is_finite() {
                    return Err(format!("group {code} is not finite"));
                }
            }
        }
        if record.kind != "LINE" && record.num(40) <= 0.0 {
            return Err(format!("{} with non-positive radius", record.kind));
        }
        if record.kind == "ARC" {
            let (start, end) = (record.num(50), record.num(51));
            if !(0.0..360.0).contains(&start) || end < start || end - start > 360.0 {
                return Err(format!("ARC angles {start}..{end} are not normalized"));
            }
        }
    }
    Ok(())
}
