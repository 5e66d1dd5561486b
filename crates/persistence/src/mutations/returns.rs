// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Monthly return mutations.

use diesel::SqliteConnection;
use diesel::prelude::*;
use labourdesk_domain::MonthlyReturn;
use tracing::{debug, info};

use crate::backend::sqlite::get_last_insert_rowid;
use crate::diesel_schema::monthly_returns;
use crate::error::PersistenceError;
use crate::mutations::now_iso8601;

/// Writes a return, inserting it or overwriting the stored row for the same
/// officer and period.
///
/// The stored row is re-read inside the caller's transaction, so a row that
/// was sealed concurrently is never overwritten.
///
/// # Returns
///
/// The storage ID of the row.
///
/// # Errors
///
/// Returns `ReturnLocked` if the stored row is locked, or an error if
/// serialization or the write fails.
pub fn upsert_return(
    conn: &mut SqliteConnection,
    record: &MonthlyReturn,
) -> Result<i64, PersistenceError> {
    let year: i32 = i32::from(record.period.year());
    let month: i32 = i32::from(record.period.month());
    let sections_json: String = serde_json::to_string(&record.sections)?;
    let now: String = now_iso8601()?;
    let locked_at: Option<&str> = record.status.is_locked().then_some(now.as_str());

    let existing: Option<(i64, String)> = monthly_returns::table
        .filter(monthly_returns::officer_id.eq(record.officer_id.value()))
        .filter(monthly_returns::year.eq(year))
        .filter(monthly_returns::month.eq(month))
        .select((monthly_returns::return_id, monthly_returns::status))
        .first(conn)
        .optional()?;

    match existing {
        Some((_, status)) if status == "Locked" => Err(PersistenceError::ReturnLocked {
            officer_id: record.officer_id.to_string(),
            period: record.period.to_string(),
        }),
        Some((return_id, _)) => {
            debug!("Overwriting return {} ({})", return_id, record.period);
            diesel::update(monthly_returns::table)
                .filter(monthly_returns::return_id.eq(return_id))
                .set((
                    monthly_returns::role.eq(record.role.as_str()),
                    monthly_returns::status.eq(record.status.as_str()),
                    monthly_returns::remarks.eq(&record.remarks),
                    monthly_returns::sections_json.eq(&sections_json),
                    monthly_returns::submitted_at.eq(&now),
                    monthly_returns::locked_at.eq(locked_at),
                ))
                .execute(conn)?;
            Ok(return_id)
        }
        None => {
            diesel::insert_into(monthly_returns::table)
                .values((
                    monthly_returns::officer_id.eq(record.officer_id.value()),
                    monthly_returns::role.eq(record.role.as_str()),
                    monthly_returns::year.eq(year),
                    monthly_returns::month.eq(month),
                    monthly_returns::status.eq(record.status.as_str()),
                    monthly_returns::remarks.eq(&record.remarks),
                    monthly_returns::sections_json.eq(&sections_json),
                    monthly_returns::created_at.eq(&now),
                    monthly_returns::submitted_at.eq(&now),
                    monthly_returns::locked_at.eq(locked_at),
                ))
                .execute(conn)?;
            let return_id: i64 = get_last_insert_rowid(conn)?;
            info!(
                return_id,
                "Stored {} return of {} for {}", record.status, record.officer_id, record.period
            );
            Ok(return_id)
        }
    }
}
