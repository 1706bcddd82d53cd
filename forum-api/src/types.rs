//! Wire types for the forum API: raw responses, attendance replies and
//! credit history pages.

use crate::error::ApiError;
use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use serde::Deserialize;
use serde_json::Value;

/// Timezone every credit timestamp is normalised to before comparison.
pub const REFERENCE_TZ: Tz = chrono_tz::Asia::Shanghai;

/// Status and body of a completed HTTP exchange.
///
/// Non-2xx statuses are still a `RawResponse`; classifying them is up to
/// the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response body decoded as text.
    pub body: String,
}

impl RawResponse {
    /// `true` for a 403, the status the forums answer with when anti-bot
    /// protection rejects a request.
    #[must_use]
    pub fn is_blocked(&self) -> bool {
        self.status == 403
    }
}

/// Body of `POST /api/attendance`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttendanceReply {
    /// Whether the check-in was awarded.
    pub success: bool,
    /// Server message, e.g. `今日签到获得鸡腿 5 个` or `请勿重复签到`.
    pub message: Option<String>,
}

impl AttendanceReply {
    /// Read a reply out of an already-parsed JSON body.
    ///
    /// Fields are read leniently: a missing or non-boolean `success` counts
    /// as `false` and a non-string `message` as absent.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Parse`] when the body is not a JSON object.
    pub fn from_value(value: &Value) -> Result<Self, ApiError> {
        let object = value
            .as_object()
            .ok_or_else(|| ApiError::Parse("attendance reply is not a JSON object".into()))?;
        Ok(Self {
            success: object
                .get("success")
                .and_then(Value::as_bool)
                .unwrap_or(false),
            message: object
                .get("message")
                .and_then(Value::as_str)
                .map(str::to_owned),
        })
    }
}

/// One page of `GET /api/account/credit/page-N`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreditPage {
    /// Whether the server accepted the request.
    #[serde(default)]
    pub success: bool,
    /// Ledger rows as `[amount, balance, description, timestamp]` tuples,
    /// newest first.
    #[serde(default)]
    pub data: Option<Vec<Value>>,
}

impl CreditPage {
    /// Parse a page body.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Parse`] if the body is not a JSON page object.
    pub fn parse(body: &str) -> Result<Self, ApiError> {
        serde_json::from_str(body).map_err(|e| ApiError::Parse(format!("credit page: {e}")))
    }
}

/// One ledger entry from the credit history.
#[derive(Debug, Clone, PartialEq)]
pub struct CreditRecord {
    /// Signed change in credit.
    pub amount: i64,
    /// Balance after the change.
    pub balance: i64,
    /// Free-text description of the event.
    pub description: String,
    /// When the entry was booked, in [`REFERENCE_TZ`].
    pub time: DateTime<Tz>,
}

impl CreditRecord {
    /// Decode a fixed-position `[amount, balance, description, timestamp]`
    /// tuple.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Parse`] if the row is not a 4-element array or any
    /// element has an unexpected type.
    pub fn from_tuple(row: &Value) -> Result<Self, ApiError> {
        let cells = row
            .as_array()
            .filter(|cells| cells.len() >= 4)
            .ok_or_else(|| ApiError::Parse(format!("credit row is not a 4-tuple: {row}")))?;

        let amount = integer_cell(&cells[0], "amount")?;
        let balance = integer_cell(&cells[1], "balance")?;
        let description = cells[2]
            .as_str()
            .ok_or_else(|| ApiError::Parse("credit description is not a string".into()))?
            .to_owned();
        let time = parse_timestamp(&cells[3])?;

        Ok(Self {
            amount,
            balance,
            description,
            time,
        })
    }
}

fn integer_cell(cell: &Value, field: &str) -> Result<i64, ApiError> {
    cell.as_i64()
        .or_else(|| {
            cell.as_f64()
                .filter(|f| f.fract() == 0.0)
                .map(|f| f as i64)
        })
        .ok_or_else(|| ApiError::Parse(format!("credit {field} is not an integer: {cell}")))
}

/// Normalise a credit timestamp to [`REFERENCE_TZ`].
///
/// Accepts RFC 3339 strings, naive `YYYY-MM-DD HH:MM:SS` /
/// `YYYY-MM-DDTHH:MM:SS[.fff]` strings (read as reference-timezone wall
/// clock) and integer epoch milliseconds.
///
/// # Errors
///
/// Returns [`ApiError::Parse`] for any other shape.
pub fn parse_timestamp(value: &Value) -> Result<DateTime<Tz>, ApiError> {
    match value {
        Value::String(text) => {
            if let Ok(parsed) = DateTime::parse_from_rfc3339(text) {
                return Ok(parsed.with_timezone(&REFERENCE_TZ));
            }
            ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f"]
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
                .and_then(|naive| REFERENCE_TZ.from_local_datetime(&naive).earliest())
                .ok_or_else(|| ApiError::Parse(format!("unrecognised timestamp: {text}")))
        }
        Value::Number(number) => number
            .as_i64()
            .and_then(|millis| Utc.timestamp_millis_opt(millis).single())
            .map(|utc| utc.with_timezone(&REFERENCE_TZ))
            .ok_or_else(|| ApiError::Parse(format!("unrecognised timestamp: {number}"))),
        other => Err(ApiError::Parse(format!("unrecognised timestamp: {other}"))),
    }
}
