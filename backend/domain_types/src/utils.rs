use crate::errors;

pub type Error = error_stack::Report<errors::ConnectorError>;

pub fn missing_field_err(
    message: &'static str,
) -> Box<dyn Fn() -> error_stack::Report<errors::ConnectorError> + 'static> {
    Box::new(move || {
        errors::ConnectorError::MissingRequiredField {
            field_name: message,
        }
        .into()
    })
}

/// Minor-unit amounts are never negative; refunds carry their own transaction type.
pub fn non_negative_amount(
    amount: Option<i64>,
    field_name: &'static str,
) -> Result<u64, Error> {
    let amount = amount.ok_or_else(missing_field_err(field_name))?;
    u64::try_from(amount)
        .map_err(|_| errors::ConnectorError::InvalidAmount { field_name }.into())
}

/// Treats an empty string the same as an absent value.
pub fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|value| !value.is_empty())
}
