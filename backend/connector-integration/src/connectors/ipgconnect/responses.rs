use common_utils::CustomResult;
use domain_types::errors;
use error_stack::{report, ResultExt};
use quick_xml::{events::Event, Reader};

/// The parts of an `IPGApiOrderResponse` the connector acts on.
///
/// The gateway answers inside a SOAP envelope, and failed orders arrive as a
/// SOAP fault carrying the order response in its detail. Elements are matched
/// on their local name so the namespace prefixes chosen by the gateway don't
/// matter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IpgApiOrderResponse {
    pub transaction_result: Option<String>,
    pub approval_code: Option<String>,
    pub order_id: Option<String>,
    pub tdate: Option<String>,
    pub error_message: Option<String>,
    pub processor_response_message: Option<String>,
}

#[derive(Debug, Clone, Copy)]
enum ResponseElement {
    TransactionResult,
    ApprovalCode,
    OrderId,
    TDate,
    ErrorMessage,
    ProcessorResponseMessage,
    FaultString,
}

impl ResponseElement {
    fn from_local_name(name: &[u8]) -> Option<Self> {
        match name {
            b"TransactionResult" => Some(Self::TransactionResult),
            b"ApprovalCode" => Some(Self::ApprovalCode),
            b"OrderId" => Some(Self::OrderId),
            b"TDate" => Some(Self::TDate),
            b"ErrorMessage" => Some(Self::ErrorMessage),
            b"ProcessorResponseMessage" => Some(Self::ProcessorResponseMessage),
            b"faultstring" => Some(Self::FaultString),
            _ => None,
        }
    }
}

impl IpgApiOrderResponse {
    pub fn parse(xml: &str) -> CustomResult<Self, errors::ConnectorError> {
        let mut reader = Reader::from_str(xml);
        reader.trim_text(true);

        let mut response = Self::default();
        let mut fault_string = None;
        let mut is_order_response = false;
        let mut current = None;

        loop {
            match reader
                .read_event()
                .change_context(errors::ConnectorError::ResponseDeserializationFailed)?
            {
                Event::Start(element) => {
                    let local_name = element.local_name();
                    if local_name.as_ref() == b"IPGApiOrderResponse" {
                        is_order_response = true;
                    }
                    current = ResponseElement::from_local_name(local_name.as_ref());
                }
                Event::Text(text) => {
                    let Some(element) = current else { continue };
                    let value = text
                        .unescape()
                        .change_context(errors::ConnectorError::ResponseDeserializationFailed)?
                        .into_owned();
                    let slot = match element {
                        ResponseElement::TransactionResult => &mut response.transaction_result,
                        ResponseElement::ApprovalCode => &mut response.approval_code,
                        ResponseElement::OrderId => &mut response.order_id,
                        ResponseElement::TDate => &mut response.tdate,
                        ResponseElement::ErrorMessage => &mut response.error_message,
                        ResponseElement::ProcessorResponseMessage => {
                            &mut response.processor_response_message
                        }
                        ResponseElement::FaultString => &mut fault_string,
                    };
                    slot.get_or_insert(value);
                }
                Event::End(_) => current = None,
                Event::Eof => break,
                _ => {}
            }
        }

        match (is_order_response, fault_string) {
            (true, fault_string) => {
                if response.error_message.is_none() {
                    response.error_message = fault_string;
                }
                Ok(response)
            }
            (false, Some(fault_string)) => Ok(Self {
                error_message: Some(fault_string),
                ..Self::default()
            }),
            (false, None) => Err(report!(
                errors::ConnectorError::ResponseDeserializationFailed
            ))
            .attach_printable("no IPGApiOrderResponse element in webservice response"),
        }
    }
}
