use {
    crate::api::RestError,
    sqlx::{
        Pool,
        Postgres,
    },
    std::{
        future::Future,
        time::Duration,
    },
    time::{
        OffsetDateTime,
        PrimitiveDateTime,
        UtcOffset,
    },
};

pub type DB = Pool<Postgres>;

/// Columns are `timestamp` without time zone and always hold UTC.
pub fn to_primitive(time: OffsetDateTime) -> PrimitiveDateTime {
    let time = time.to_offset(UtcOffset::UTC);
    PrimitiveDateTime::new(time.date(), time.time())
}

/// Current time truncated to microseconds, the precision of a `timestamp` column. Values built
/// from it compare equal after a store round trip.
pub fn now_in_store_precision() -> OffsetDateTime {
    let now = OffsetDateTime::now_utc();
    now.replace_nanosecond(now.nanosecond() / 1_000 * 1_000)
        .unwrap_or(now)
}

/// Bounds a store call by `timeout`. An elapsed call is reported like any other store failure
/// and is not retried.
pub async fn with_store_timeout<T, F>(
    timeout: Duration,
    name: &str,
    future: F,
) -> Result<T, RestError>
where
    F: Future<Output = Result<T, RestError>>,
{
    match tokio::time::timeout(timeout, future).await {
        Ok(result) => result,
        Err(_) => {
            tracing::error!(
                name,
                timeout = ?timeout,
                "Store call timed out"
            );
            Err(RestError::TemporarilyUnavailable)
        }
    }
}
