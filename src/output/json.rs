use crate::error::Result;
use crate::rules::{SetupScanResult, SkillScanResult};

/// Render a single-skill result as pretty JSON.
pub fn render_skill(result: &SkillScanResult) -> Result<String> {
    Ok(serde_json::to_string_pretty(result)?)
}

/// Render a setup-level result as pretty JSON.
pub fn render_setup(result: &SetupScanResult) -> Result<String> {
    Ok(serde_json::to_string_pretty(result)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::{Rating, SetupScanResult};

    #[test]
    fn setup_json_uses_wire_field_names() {
        let result = SetupScanResult {
            overall_score: 100,
            overall_rating: Rating::Green,
            skills: vec![],
            config_findings: vec![],
            total_findings: 0,
            scan_duration: 5,
            summary: "clean".into(),
        };
        let json = render_setup(&result).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["overallScore"], 100);
        assert_eq!(value["overallRating"], "GREEN");
        assert_eq!(value["totalFindings"], 0);
        assert_eq!(value["configFindings"], serde_json::json!([]));
    }
}
