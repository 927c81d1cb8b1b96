//! Companies House registry adapter implementation.
//!
//! The strictness of each section follows how reliably Companies House
//! reports it:
//!
//! | Section | Section absent | Fields once present |
//! |---|---|---|
//! | `registered_office_address` | allowed | each independently optional |
//! | `confirmation_statement` | allowed | all mandatory except `last_made_up_to` |
//! | `accounts` | failure | see below |
//! | `accounts.accounting_reference_date` | allowed | all mandatory |
//! | `accounts.next_accounts` | allowed | all mandatory |
//! | `accounts.last_accounts` | allowed | each independently optional |

use crate::error::{NormalizationError, Result};
use crate::fields::Section;
use crate::schema::{
    AccountingReferenceDate, Accounts, CompanyRecord, ConfirmationStatement, LastAccounts,
    NextAccounts, RegisteredOfficeAddress,
};
use crate::traits::RegistryAdapter;
use serde_json::Value;
use tracing::debug;

/// Companies House registry adapter.
///
/// Handles the `GET /company/{company_number}` profile payload.
#[derive(Debug, Default, Clone)]
pub struct CompaniesHouseAdapter;

impl CompaniesHouseAdapter {
    /// Create a new Companies House adapter.
    pub fn new() -> Self {
        Self
    }
}

impl RegistryAdapter for CompaniesHouseAdapter {
    const NAME: &'static str = "companies_house";

    fn normalize(&self, root: &Value, company_number: &str) -> Result<CompanyRecord> {
        let root = Section::root(root)?;

        let company_status = read_identity_text(&root, "company_status")?;
        let company_name = read_identity_text(&root, "company_name")?;

        let registered_office_address = root
            .optional_section("registered_office_address")?
            .map(|section| read_registered_office_address(&section))
            .transpose()?;

        let confirmation_statement = root
            .optional_section("confirmation_statement")?
            .map(|section| read_confirmation_statement(&section))
            .transpose()?;

        let accounts = read_accounts(&root.required_section("accounts")?)?;

        debug!(
            "[{}] Normalized company {} (address: {}, confirmation statement: {})",
            Self::NAME,
            company_number,
            registered_office_address.is_some(),
            confirmation_statement.is_some()
        );

        Ok(CompanyRecord {
            company_number: company_number.to_string(),
            company_status,
            company_name,
            registered_office_address,
            confirmation_statement,
            accounts,
        })
    }
}

// ============================================================================
// Section Readers (private)
// ============================================================================

/// Top-level identity text. A value that is not text counts as missing.
fn read_identity_text(root: &Section<'_>, key: &str) -> Result<String> {
    root.required_text(key).map_err(|e| match e {
        NormalizationError::InvalidValue { field, .. } => {
            NormalizationError::MissingMandatoryField { field }
        }
        other => other,
    })
}

fn read_registered_office_address(section: &Section<'_>) -> Result<RegisteredOfficeAddress> {
    Ok(RegisteredOfficeAddress {
        premises: section.optional_text("premises")?,
        address_line_1: section.optional_text("address_line_1")?,
        address_line_2: section.optional_text("address_line_2")?,
        locality: section.optional_text("locality")?,
        region: section.optional_text("region")?,
        postal_code: section.optional_text("postal_code")?,
        country: section.optional_text("country")?,
    })
}

fn read_confirmation_statement(section: &Section<'_>) -> Result<ConfirmationStatement> {
    Ok(ConfirmationStatement {
        overdue: section.required_bool("overdue")?,
        next_due: section.required_date("next_due")?,
        next_made_up_to: section.required_date("next_made_up_to")?,
        last_made_up_to: section.optional_date("last_made_up_to")?,
    })
}

fn read_accounts(section: &Section<'_>) -> Result<Accounts> {
    Ok(Accounts {
        accounting_reference_date: section
            .optional_section("accounting_reference_date")?
            .map(|ard| read_accounting_reference_date(&ard))
            .transpose()?,
        next_accounts: section
            .optional_section("next_accounts")?
            .map(|next| read_next_accounts(&next))
            .transpose()?,
        last_accounts: section
            .optional_section("last_accounts")?
            .map(|last| read_last_accounts(&last))
            .transpose()?,
        next_due: section.optional_date("next_due")?,
        next_made_up_to: section.optional_date("next_made_up_to")?,
        overdue: section.optional_bool("overdue")?.unwrap_or(false),
    })
}

fn read_accounting_reference_date(section: &Section<'_>) -> Result<AccountingReferenceDate> {
    Ok(AccountingReferenceDate {
        day: section.required_text("day")?,
        month: section.required_text("month")?,
    })
}

fn read_next_accounts(section: &Section<'_>) -> Result<NextAccounts> {
    Ok(NextAccounts {
        period_start_on: section.required_date("period_start_on")?,
        period_end_on: section.required_date("period_end_on")?,
        overdue: section.required_bool("overdue")?,
        due_on: section.required_date("due_on")?,
    })
}

fn read_last_accounts(section: &Section<'_>) -> Result<LastAccounts> {
    Ok(LastAccounts {
        made_up_to: section.optional_date("made_up_to")?,
        accounts_type: section.optional_text("type")?,
        period_start_on: section.optional_date("period_start_on")?,
        period_end_on: section.optional_date("period_end_on")?,
    })
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use serde_json::json;

    fn date(raw: &str) -> NaiveDate {
        NaiveDate::parse_from_str(raw, "%Y-%m-%d").unwrap()
    }

    fn full_payload() -> Value {
        json!({
            "company_name": "ACME WIDGETS LIMITED",
            "company_number": "00000006",
            "company_status": "active",
            "registered_office_address": {
                "address_line_1": "1 High Street",
                "locality": "London",
                "postal_code": "EC1A 1BB",
                "country": "England"
            },
            "confirmation_statement": {
                "last_made_up_to": "2023-06-30",
                "next_due": "2024-07-14",
                "next_made_up_to": "2024-06-30",
                "overdue": false
            },
            "accounts": {
                "accounting_reference_date": {"day": "31", "month": "12"},
                "last_accounts": {
                    "made_up_to": "2022-12-31",
                    "period_end_on": "2022-12-31",
                    "period_start_on": "2022-01-01",
                    "type": "full"
                },
                "next_accounts": {
                    "due_on": "2024-09-30",
                    "overdue": false,
                    "period_end_on": "2023-12-31",
                    "period_start_on": "2023-01-01"
                },
                "next_due": "2024-09-30",
                "next_made_up_to": "2023-12-31",
                "overdue": false
            }
        })
    }

    fn normalize(payload: &Value) -> Result<CompanyRecord> {
        CompaniesHouseAdapter::new().normalize(payload, "00000006")
    }

    #[test]
    fn test_normalize_full_payload() {
        let record = normalize(&full_payload()).unwrap();

        assert_eq!(record.company_number, "00000006");
        assert_eq!(record.company_status, "active");
        assert_eq!(record.company_name, "ACME WIDGETS LIMITED");

        let address = record.registered_office_address.unwrap();
        assert_eq!(address.address_line_1.as_deref(), Some("1 High Street"));
        assert_eq!(address.postal_code.as_deref(), Some("EC1A 1BB"));
        assert_eq!(address.region, None);

        let statement = record.confirmation_statement.unwrap();
        assert!(!statement.overdue);
        assert_eq!(statement.next_due, date("2024-07-14"));
        assert_eq!(statement.last_made_up_to, Some(date("2023-06-30")));

        let accounts = record.accounts;
        assert_eq!(
            accounts.accounting_reference_date,
            Some(AccountingReferenceDate {
                day: "31".to_string(),
                month: "12".to_string()
            })
        );
        assert_eq!(
            accounts.next_accounts,
            Some(NextAccounts {
                period_start_on: date("2023-01-01"),
                period_end_on: date("2023-12-31"),
                overdue: false,
                due_on: date("2024-09-30"),
            })
        );
        assert_eq!(
            accounts.last_accounts.unwrap().accounts_type.as_deref(),
            Some("full")
        );
        assert_eq!(accounts.next_made_up_to, Some(date("2023-12-31")));
    }

    #[test]
    fn test_company_number_comes_from_caller() {
        let record = CompaniesHouseAdapter::new()
            .normalize(&full_payload(), "SC123456")
            .unwrap();
        assert_eq!(record.company_number, "SC123456");
    }

    #[test]
    fn test_minimal_payload_has_absent_sections() {
        let payload = json!({"company_status": "active", "company_name": "Acme", "accounts": {}});
        let record = normalize(&payload).unwrap();

        assert_eq!(record.company_status, "active");
        assert_eq!(record.company_name, "Acme");
        assert_eq!(record.registered_office_address, None);
        assert_eq!(record.confirmation_statement, None);
        assert_eq!(record.accounts.accounting_reference_date, None);
        assert_eq!(record.accounts.next_accounts, None);
        assert_eq!(record.accounts.last_accounts, None);
        assert_eq!(record.accounts.next_made_up_to, None);
        assert!(!record.accounts.overdue);
    }

    #[test]
    fn test_null_sections_are_absent() {
        let mut payload = full_payload();
        payload["registered_office_address"] = Value::Null;
        payload["confirmation_statement"] = Value::Null;
        payload["accounts"]["next_accounts"] = Value::Null;
        payload["accounts"]["last_accounts"] = Value::Null;
        payload["accounts"]["accounting_reference_date"] = Value::Null;

        let record = normalize(&payload).unwrap();
        assert_eq!(record.registered_office_address, None);
        assert_eq!(record.confirmation_statement, None);
        assert_eq!(record.accounts.next_accounts, None);
        assert_eq!(record.accounts.last_accounts, None);
        assert_eq!(record.accounts.accounting_reference_date, None);
    }

    #[test]
    fn test_empty_address_is_present_but_empty() {
        let mut payload = full_payload();
        payload["registered_office_address"] = json!({});

        let record = normalize(&payload).unwrap();
        assert_eq!(
            record.registered_office_address,
            Some(RegisteredOfficeAddress::default())
        );
    }

    #[test]
    fn test_missing_company_status() {
        let mut payload = full_payload();
        payload.as_object_mut().unwrap().remove("company_status");

        assert_eq!(
            normalize(&payload).unwrap_err(),
            NormalizationError::MissingMandatoryField {
                field: "company_status".to_string()
            }
        );
    }

    #[test]
    fn test_missing_company_name() {
        let mut payload = full_payload();
        payload.as_object_mut().unwrap().remove("company_name");

        assert_eq!(
            normalize(&payload).unwrap_err(),
            NormalizationError::MissingMandatoryField {
                field: "company_name".to_string()
            }
        );
    }

    #[test]
    fn test_non_text_identity_fields_are_missing() {
        let mut payload = full_payload();
        payload["company_status"] = json!({"x": 1});
        assert_eq!(
            normalize(&payload).unwrap_err(),
            NormalizationError::MissingMandatoryField {
                field: "company_status".to_string()
            }
        );

        let mut payload = full_payload();
        payload["company_name"] = json!(["ACME"]);
        assert_eq!(
            normalize(&payload).unwrap_err(),
            NormalizationError::MissingMandatoryField {
                field: "company_name".to_string()
            }
        );
    }

    #[test]
    fn test_missing_accounts() {
        let payload = json!({"company_status": "active", "company_name": "Acme"});

        assert_eq!(
            normalize(&payload).unwrap_err(),
            NormalizationError::MissingMandatoryField {
                field: "accounts".to_string()
            }
        );
    }

    #[test]
    fn test_last_accounts_fields_are_independent() {
        let payload = json!({
            "company_status": "active",
            "company_name": "Acme",
            "accounts": {"last_accounts": {"type": "full"}}
        });

        let last = normalize(&payload).unwrap().accounts.last_accounts.unwrap();
        assert_eq!(last.accounts_type.as_deref(), Some("full"));
        assert_eq!(last.made_up_to, None);
        assert_eq!(last.period_start_on, None);
        assert_eq!(last.period_end_on, None);
    }

    #[test]
    fn test_next_accounts_is_all_or_nothing() {
        let mut payload = full_payload();
        payload["accounts"]["next_accounts"]
            .as_object_mut()
            .unwrap()
            .remove("overdue");

        assert_eq!(
            normalize(&payload).unwrap_err(),
            NormalizationError::MissingMandatoryField {
                field: "accounts.next_accounts.overdue".to_string()
            }
        );
    }

    #[test]
    fn test_accounting_reference_date_requires_day_and_month() {
        let mut payload = full_payload();
        payload["accounts"]["accounting_reference_date"] = json!({"day": "31"});

        assert_eq!(
            normalize(&payload).unwrap_err(),
            NormalizationError::MissingMandatoryField {
                field: "accounts.accounting_reference_date.month".to_string()
            }
        );
    }

    #[test]
    fn test_confirmation_statement_requires_mandatory_fields() {
        let mut payload = full_payload();
        payload["confirmation_statement"]
            .as_object_mut()
            .unwrap()
            .remove("next_due");

        assert_eq!(
            normalize(&payload).unwrap_err(),
            NormalizationError::MissingMandatoryField {
                field: "confirmation_statement.next_due".to_string()
            }
        );
    }

    #[test]
    fn test_confirmation_statement_last_made_up_to_is_optional() {
        let mut payload = full_payload();
        payload["confirmation_statement"]
            .as_object_mut()
            .unwrap()
            .remove("last_made_up_to");

        let statement = normalize(&payload).unwrap().confirmation_statement.unwrap();
        assert_eq!(statement.last_made_up_to, None);
        assert_eq!(statement.next_made_up_to, date("2024-06-30"));
    }

    #[test]
    fn test_invalid_next_accounts_due_on() {
        let mut payload = full_payload();
        payload["accounts"]["next_accounts"]["due_on"] = json!("30-09-2024");

        assert_eq!(
            normalize(&payload).unwrap_err(),
            NormalizationError::InvalidDate {
                field: "accounts.next_accounts.due_on".to_string(),
                raw_value: "30-09-2024".to_string()
            }
        );
    }

    #[test]
    fn test_unpadded_date_is_invalid() {
        let mut payload = full_payload();
        payload["accounts"]["next_made_up_to"] = json!("2023-6-30");

        assert_eq!(
            normalize(&payload).unwrap_err(),
            NormalizationError::InvalidDate {
                field: "accounts.next_made_up_to".to_string(),
                raw_value: "2023-6-30".to_string()
            }
        );
    }

    #[test]
    fn test_invalid_optional_date_is_still_a_failure() {
        let mut payload = full_payload();
        payload["accounts"]["last_accounts"]["made_up_to"] = json!("not-a-date");

        assert!(matches!(
            normalize(&payload),
            Err(NormalizationError::InvalidDate { .. })
        ));
    }

    #[test]
    fn test_accounts_overdue_reported() {
        let mut payload = full_payload();
        payload["accounts"]["overdue"] = json!(true);

        assert!(normalize(&payload).unwrap().accounts.overdue);
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let payload = full_payload();
        assert_eq!(normalize(&payload).unwrap(), normalize(&payload).unwrap());
    }

    #[test]
    fn test_parse_and_normalize_bytes() {
        let adapter = CompaniesHouseAdapter::new();
        let payload = br#"{"company_status":"dissolved","company_name":"Gone Ltd","accounts":{}}"#;

        let record = adapter.parse_and_normalize(payload, "01234567").unwrap();
        assert_eq!(record.company_status, "dissolved");

        assert!(matches!(
            adapter.parse_and_normalize(b"<html>", "01234567"),
            Err(NormalizationError::Malformed(_))
        ));
    }
}
