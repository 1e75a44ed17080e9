use crate::error::NudgeError;
use nudge_domain::RelatedType;

pub struct Guard {}

impl Guard {
    pub fn against_malformed_related_type(val: &str) -> Result<RelatedType, NudgeError> {
        val.parse()
            .map_err(|e| NudgeError::BadClientData(format!("{}", e)))
    }

    pub fn against_empty_related_id(val: String) -> Result<String, NudgeError> {
        let val = val.trim().to_string();
        if val.is_empty() {
            return Err(NudgeError::BadClientData(
                "The related id can not be empty".into(),
            ));
        }
        Ok(val)
    }
}
