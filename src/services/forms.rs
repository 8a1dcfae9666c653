//! Submission forms and their server-side validation.
//!
//! Fields arrive as raw strings (HTML form posts) or loosely typed JSON and are
//! checked here before anything touches the database, so a blank required field
//! never produces an insert.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::validation::{checkbox, string_or_number, ValidationService};
use crate::errors::{SubmissionError, SubmissionResult};

pub trait Validate {
    type Output;

    fn validate(&self) -> SubmissionResult<Self::Output>;
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClaimForm {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, deserialize_with = "string_or_number")]
    pub amended_amount: String,
    #[serde(default)]
    pub asks: String,
    #[serde(default, deserialize_with = "checkbox")]
    pub grant_canceled_confirmed: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ValidClaim {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub amended_amount: Option<i64>,
    pub asks: Option<String>,
}

impl Validate for ClaimForm {
    type Output = ValidClaim;

    fn validate(&self) -> SubmissionResult<ValidClaim> {
        let first_name = ValidationService::required(&self.first_name, "First name")?;
        let last_name = ValidationService::required(&self.last_name, "Last name")?;
        let email = ValidationService::email(&self.email, "Email")?;
        let amended_amount =
            ValidationService::whole_dollars(&self.amended_amount, "Amended amount")?;

        if !self.grant_canceled_confirmed {
            return Err(SubmissionError::CancellationNotConfirmed);
        }

        Ok(ValidClaim {
            first_name,
            last_name,
            email,
            amended_amount,
            asks: ValidationService::optional(&self.asks),
        })
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PledgeForm {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, deserialize_with = "string_or_number")]
    pub amount: String,
    #[serde(default)]
    pub tasks: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ValidPledge {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub amount: Option<f64>,
    pub tasks: Option<String>,
}

impl Validate for PledgeForm {
    type Output = ValidPledge;

    fn validate(&self) -> SubmissionResult<ValidPledge> {
        Ok(ValidPledge {
            first_name: ValidationService::required(&self.first_name, "First name")?,
            last_name: ValidationService::required(&self.last_name, "Last name")?,
            email: ValidationService::email(&self.email, "Email")?,
            amount: ValidationService::currency(&self.amount, "Amount")?,
            tasks: ValidationService::optional(&self.tasks),
        })
    }
}

/// The add-research form. List fields are comma-separated.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NewResearchForm {
    pub award_number: String,
    pub title: String,
    #[serde(rename = "abstract")]
    pub abstract_text: String,
    pub nsf_organization: String,
    pub programs: String,
    pub start_date: String,
    pub last_amendment_date: String,
    pub principal_investigator: String,
    pub state: String,
    pub organization: String,
    pub award_instrument: String,
    pub program_manager: String,
    pub end_date: String,
    #[serde(deserialize_with = "string_or_number")]
    pub awarded_amount_to_date: String,
    pub co_pi_names: String,
    pub pi_email_address: String,
    pub organization_street: String,
    pub organization_city: String,
    pub organization_state: String,
    pub organization_zip: String,
    pub organization_phone: String,
    pub nsf_directorate: String,
    pub program_element_codes: String,
    pub program_reference_codes: String,
    #[serde(deserialize_with = "string_or_number")]
    pub arra_amount: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ValidResearch {
    pub award_number: String,
    pub title: String,
    pub abstract_text: String,
    pub principal_investigator: String,
    pub pi_email_address: String,
    pub co_pi_names: Vec<String>,
    pub award_instrument: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub last_amendment_date: Option<NaiveDate>,
    pub organization: String,
    pub organization_street: String,
    pub organization_city: String,
    pub organization_state: String,
    pub organization_zip: String,
    pub organization_phone: String,
    pub state: Option<String>,
    pub nsf_organization: String,
    pub nsf_directorate: String,
    pub program_manager: String,
    pub programs: Vec<String>,
    pub program_element_codes: Vec<String>,
    pub program_reference_codes: Vec<String>,
    pub awarded_amount_to_date: f64,
    pub arra_amount: Option<f64>,
}

impl Validate for NewResearchForm {
    type Output = ValidResearch;

    fn validate(&self) -> SubmissionResult<ValidResearch> {
        let award_number = ValidationService::required(&self.award_number, "Award number")?;
        let title = ValidationService::required(&self.title, "Title")?;
        let abstract_text = ValidationService::required(&self.abstract_text, "Abstract")?;
        let principal_investigator =
            ValidationService::required(&self.principal_investigator, "Principal investigator")?;
        let pi_email_address =
            ValidationService::email(&self.pi_email_address, "PI email address")?;
        let award_instrument = ValidationService::required(&self.award_instrument, "Grant type")?;
        let start_date = ValidationService::required_date(&self.start_date, "Start date")?;
        let end_date = ValidationService::required_date(&self.end_date, "End date")?;
        let last_amendment_date =
            ValidationService::date(&self.last_amendment_date, "Last amendment date")?;
        let organization = ValidationService::required(&self.organization, "Organization")?;
        let organization_street =
            ValidationService::required(&self.organization_street, "Organization street")?;
        let organization_city =
            ValidationService::required(&self.organization_city, "Organization city")?;
        let organization_state =
            ValidationService::required(&self.organization_state, "Organization state")?;
        let organization_zip =
            ValidationService::required(&self.organization_zip, "Organization zip")?;
        let organization_phone =
            ValidationService::required(&self.organization_phone, "Organization phone")?;
        let nsf_organization =
            ValidationService::required(&self.nsf_organization, "NSF organization")?;
        let nsf_directorate =
            ValidationService::required(&self.nsf_directorate, "NSF directorate")?;
        let program_manager =
            ValidationService::required(&self.program_manager, "Program manager")?;

        let programs = ValidationService::list(&self.programs);
        if programs.is_empty() {
            return Err(SubmissionError::MissingField("Programs"));
        }

        let awarded_amount_to_date =
            ValidationService::decimal(&self.awarded_amount_to_date, "Awarded amount to date")?
                .ok_or(SubmissionError::MissingField("Awarded amount to date"))?;
        let arra_amount = ValidationService::decimal(&self.arra_amount, "ARRA amount")?;

        Ok(ValidResearch {
            award_number,
            title,
            abstract_text,
            principal_investigator,
            pi_email_address,
            co_pi_names: ValidationService::list(&self.co_pi_names),
            award_instrument,
            start_date,
            end_date,
            last_amendment_date,
            organization,
            organization_street,
            organization_city,
            organization_state,
            organization_zip,
            organization_phone,
            state: ValidationService::optional(&self.state),
            nsf_organization,
            nsf_directorate,
            program_manager,
            programs,
            program_element_codes: ValidationService::list(&self.program_element_codes),
            program_reference_codes: ValidationService::list(&self.program_reference_codes),
            awarded_amount_to_date,
            arra_amount,
        })
    }
}
