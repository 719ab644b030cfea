//! Common utilities for the IPG connector service

pub mod consts;
pub mod crypto;
pub mod errors;
pub mod request;

pub use errors::{CryptoError, CustomResult};
pub use request::{Method, Request, RequestBuilder, RequestContent};

pub mod date_time {
    use time::{macros::format_description, OffsetDateTime, PrimitiveDateTime, UtcOffset};

    /// Current wall-clock time at the given offset from UTC. Out-of-range offsets fall back to UTC.
    pub fn now_with_offset(offset_seconds: i32) -> PrimitiveDateTime {
        let offset = UtcOffset::from_whole_seconds(offset_seconds).unwrap_or(UtcOffset::UTC);
        let local = OffsetDateTime::now_utc().to_offset(offset);
        PrimitiveDateTime::new(local.date(), local.time())
    }

    /// Format the date in the `2013:09:27-16:06:26` layout used by IPG transaction timestamps
    pub fn format_ipg_txn_datetime(date: PrimitiveDateTime) -> Result<String, time::error::Format> {
        date.format(format_description!(
            "[year]:[month padding:zero]:[day padding:zero]-[hour padding:zero repr:24]:[minute padding:zero]:[second padding:zero]"
        ))
    }

    #[cfg(test)]
    mod tests {
        use time::macros::datetime;

        #[test]
        fn formats_ipg_txn_datetime() {
            let formatted = super::format_ipg_txn_datetime(datetime!(2013-09-27 16:06:26));
            assert_eq!(formatted.ok().as_deref(), Some("2013:09:27-16:06:26"));
        }
    }
}
