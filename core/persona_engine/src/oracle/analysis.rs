use serde_json::{Map, Value};
use shared_types::{ObjectAnalysis, PersonalityHints};

use crate::error::{EngineError, EngineResult};
use crate::fallback::default_analysis;

pub const ANALYSIS_PROMPT: &str = r#"Look at the object in this image and describe it as JSON only, with exactly these keys:
{
  "object_type": "what the object is",
  "colors": ["main colors"],
  "shape": "overall shape",
  "size": "small | medium | large",
  "materials": ["materials it is made of"],
  "condition": "new, worn, scratched, broken, ...",
  "estimated_age": "new, a few years, old, vintage, ...",
  "distinctive_features": ["anything unusual"],
  "personality_hints": {"warmth_factor": 0-100, "competence_factor": 0-100, "humor_factor": 0-100}
}
Respond with the JSON object and nothing else."#;

/// Parsed oracle output plus the fields that had to be defaulted
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedAnalysis {
    pub analysis: ObjectAnalysis,
    pub defaulted: Vec<&'static str>,
}

/// Slice out the outermost JSON object, tolerating code fences and surrounding prose.
fn extract_json_object(raw: &str) -> Option<&str> {
    let start = raw.find('{')?;
    let end = raw.rfind('}')?;
    (end > start).then(|| &raw[start..=end])
}

fn string_field(map: &Map<String, Value>, key: &str) -> Option<String> {
    match map.get(key)? {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn list_field(map: &Map<String, Value>, key: &str) -> Option<Vec<String>> {
    let items: Vec<String> = match map.get(key)? {
        Value::Array(values) => values
            .iter()
            .filter_map(|v| v.as_str())
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect(),
        // some models answer "red, white" instead of a list
        Value::String(s) => s
            .split(',')
            .map(|part| part.trim().to_string())
            .filter(|part| !part.is_empty())
            .collect(),
        _ => Vec::new(),
    };
    (!items.is_empty()).then_some(items)
}

fn hint_value(map: &Map<String, Value>, key: &str) -> Option<u8> {
    let value = match map.get(key)? {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    value.is_finite().then(|| value.round().clamp(0.0, 100.0) as u8)
}

/// Parse image-oracle text into an [`ObjectAnalysis`], defaulting field by field.
///
/// Fails only when no JSON object can be recovered at all.
pub fn parse_analysis(raw: &str) -> EngineResult<ParsedAnalysis> {
    let json = extract_json_object(raw)
        .ok_or_else(|| EngineError::MalformedOracleResponse("no JSON object in analysis".to_string()))?;
    let value: Value = serde_json::from_str(json)
        .map_err(|e| EngineError::MalformedOracleResponse(format!("analysis is not valid JSON: {e}")))?;
    let map = value
        .as_object()
        .ok_or_else(|| EngineError::MalformedOracleResponse("analysis is not an object".to_string()))?;

    let defaults = default_analysis();
    let mut defaulted = Vec::new();

    let mut take_string = |key: &'static str, default: String| {
        string_field(map, key).unwrap_or_else(|| {
            defaulted.push(key);
            default
        })
    };
    let object_type = take_string("object_type", defaults.object_type);
    let shape = take_string("shape", defaults.shape);
    let size = take_string("size", defaults.size);
    let condition = take_string("condition", defaults.condition);
    let estimated_age = take_string("estimated_age", defaults.estimated_age);

    let mut take_list = |key: &'static str, default: Vec<String>| {
        list_field(map, key).unwrap_or_else(|| {
            defaulted.push(key);
            default
        })
    };
    let colors = take_list("colors", defaults.colors);
    let materials = take_list("materials", defaults.materials);
    let distinctive_features = list_field(map, "distinctive_features").unwrap_or_default();

    let default_hints = defaults.personality_hints;
    let personality_hints = match map.get("personality_hints").and_then(Value::as_object) {
        Some(hints) => PersonalityHints {
            warmth_factor: hint_value(hints, "warmth_factor").unwrap_or(default_hints.warmth_factor),
            competence_factor: hint_value(hints, "competence_factor").unwrap_or(default_hints.competence_factor),
            humor_factor: hint_value(hints, "humor_factor").unwrap_or(default_hints.humor_factor),
        },
        None => {
            defaulted.push("personality_hints");
            default_hints
        }
    };

    Ok(ParsedAnalysis {
        analysis: ObjectAnalysis {
            object_type,
            colors,
            shape,
            size,
            materials,
            condition,
            estimated_age,
            distinctive_features,
            personality_hints,
        },
        defaulted,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_fenced_json_with_prose() {
        let raw = r#"Sure! Here is the analysis:
```json
{"object_type": "mug", "colors": ["red"], "shape": "round", "size": "small",
 "materials": ["ceramic"], "condition": "worn", "estimated_age": "old",
 "distinctive_features": ["chipped handle"],
 "personality_hints": {"warmth_factor": 80, "competence_factor": 40, "humor_factor": 60}}
```
Hope that helps."#;

        let parsed = parse_analysis(raw).unwrap();
        assert!(parsed.defaulted.is_empty());
        assert_eq!(parsed.analysis.object_type, "mug");
        assert_eq!(parsed.analysis.distinctive_features, vec!["chipped handle"]);
        assert_eq!(parsed.analysis.personality_hints.warmth_factor, 80);
    }

    #[test]
    fn test_missing_fields_defaulted() {
        let parsed = parse_analysis(r#"{"object_type": "lamp", "colors": "white, gold"}"#).unwrap();

        assert_eq!(parsed.analysis.object_type, "lamp");
        assert_eq!(parsed.analysis.colors, vec!["white", "gold"]);
        assert_eq!(parsed.analysis.shape, "ordinary");
        assert_eq!(parsed.analysis.personality_hints, PersonalityHints::default());
        assert!(parsed.defaulted.contains(&"shape"));
        assert!(parsed.defaulted.contains(&"personality_hints"));
        assert!(!parsed.defaulted.contains(&"colors"));
    }

    #[test]
    fn test_hint_values_clamped_and_coerced() {
        let parsed = parse_analysis(
            r#"{"personality_hints": {"warmth_factor": 140, "competence_factor": "35", "humor_factor": -3}}"#,
        )
        .unwrap();
        let hints = parsed.analysis.personality_hints;
        assert_eq!(hints.warmth_factor, 100);
        assert_eq!(hints.competence_factor, 35);
        assert_eq!(hints.humor_factor, 0);
    }

    #[test]
    fn test_unparseable_is_malformed() {
        for raw in ["I can't see an object", "{not json}", "[1, 2]"] {
            let err = parse_analysis(raw).unwrap_err();
            assert!(matches!(err, EngineError::MalformedOracleResponse(_)), "{raw}");
        }
    }
}
