//! Normalized company record schema.
//!
//! Every optional section is an `Option`: `None` means the registry did not
//! report it, which is distinct from a section reported with empty fields.
//! Absent values are omitted from the serialized form.

use chrono::NaiveDate;
use serde::Serialize;

/// Normalized representation of one company.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyRecord {
    /// Supplied by the caller, not read from the payload.
    pub company_number: String,
    pub company_status: String,
    pub company_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registered_office_address: Option<RegisteredOfficeAddress>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confirmation_statement: Option<ConfirmationStatement>,
    pub accounts: Accounts,
}

/// Registered office address. Every field is independently optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisteredOfficeAddress {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub premises: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address_line_1: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address_line_2: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locality: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

/// Confirmation statement. Only `last_made_up_to` may be missing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmationStatement {
    pub overdue: bool,
    pub next_due: NaiveDate,
    pub next_made_up_to: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_made_up_to: Option<NaiveDate>,
}

/// Accounts section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Accounts {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accounting_reference_date: Option<AccountingReferenceDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_accounts: Option<NextAccounts>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_accounts: Option<LastAccounts>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_due: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_made_up_to: Option<NaiveDate>,
    /// `false` when the registry omits it.
    pub overdue: bool,
}

/// Day and month of the accounting reference date, as reported (e.g. "31", "12").
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountingReferenceDate {
    pub day: String,
    pub month: String,
}

/// Next accounts due. All fields are mandatory once the section exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NextAccounts {
    pub period_start_on: NaiveDate,
    pub period_end_on: NaiveDate,
    pub overdue: bool,
    pub due_on: NaiveDate,
}

/// Last accounts filed. Every field is independently optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LastAccounts {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub made_up_to: Option<NaiveDate>,
    /// Accounts type (e.g. "full", "micro-entity").
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub accounts_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub period_start_on: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub period_end_on: Option<NaiveDate>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn date(raw: &str) -> NaiveDate {
        NaiveDate::parse_from_str(raw, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_serialize_omits_absent_sections() {
        let record = CompanyRecord {
            company_number: "00000006".to_string(),
            company_status: "active".to_string(),
            company_name: "Acme".to_string(),
            registered_office_address: None,
            confirmation_statement: None,
            accounts: Accounts {
                accounting_reference_date: None,
                next_accounts: None,
                last_accounts: None,
                next_due: None,
                next_made_up_to: None,
                overdue: false,
            },
        };

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(
            value,
            json!({
                "companyNumber": "00000006",
                "companyStatus": "active",
                "companyName": "Acme",
                "accounts": {"overdue": false}
            })
        );
    }

    #[test]
    fn test_serialize_dates_as_iso_calendar_dates() {
        let statement = ConfirmationStatement {
            overdue: false,
            next_due: date("2024-07-14"),
            next_made_up_to: date("2024-06-30"),
            last_made_up_to: Some(date("2023-06-30")),
        };

        let value = serde_json::to_value(&statement).unwrap();
        assert_eq!(
            value,
            json!({
                "overdue": false,
                "nextDue": "2024-07-14",
                "nextMadeUpTo": "2024-06-30",
                "lastMadeUpTo": "2023-06-30"
            })
        );
    }

    #[test]
    fn test_serialize_last_accounts_type_field() {
        let last = LastAccounts {
            accounts_type: Some("full".to_string()),
            ..Default::default()
        };
        assert_eq!(serde_json::to_value(&last).unwrap(), json!({"type": "full"}));
    }
}
