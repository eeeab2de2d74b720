use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateVacancyPayload {
    /// User id of the company account publishing the vacancy.
    pub user_id: i64,
    #[validate(length(min = 1))]
    pub title: String,
    pub description: Option<String>,
    pub requirements: Option<String>,
    pub salary: Option<Decimal>,
    pub contract_type: Option<String>,
    pub location: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateVacancyPayload {
    #[validate(length(min = 1))]
    pub title: Option<String>,
    pub description: Option<String>,
    pub requirements: Option<String>,
    pub salary: Option<Decimal>,
    pub contract_type: Option<String>,
    pub location: Option<String>,
    pub status: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn empty_title_is_rejected_before_any_statement() {
        let payload = CreateVacancyPayload {
            user_id: 1,
            title: "".into(),
            description: None,
            requirements: None,
            salary: None,
            contract_type: None,
            location: None,
        };
        let errs = payload.validate().unwrap_err();
        assert!(errs.field_errors().contains_key("title"));
    }
}
