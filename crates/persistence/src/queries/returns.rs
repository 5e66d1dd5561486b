// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Monthly return queries.
//!
//! Section bodies are stored as JSON and decoded back into
//! `ReturnSections` on read.

use std::collections::BTreeSet;

use diesel::SqliteConnection;
use diesel::prelude::*;
use labourdesk_domain::{
    MonthlyReturn, OfficerId, ReportingPeriod, ReturnSections, ReturnStatus, Role,
};
use tracing::debug;

use crate::diesel_schema::monthly_returns;
use crate::error::PersistenceError;

/// Diesel Queryable struct for return rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = monthly_returns)]
struct ReturnRow {
    return_id: i64,
    officer_id: String,
    role: String,
    year: i32,
    month: i32,
    status: String,
    remarks: String,
    sections_json: String,
    submitted_at: String,
}

impl ReturnRow {
    fn into_return(self) -> Result<MonthlyReturn, PersistenceError> {
        let year: u16 = u16::try_from(self.year)
            .map_err(|_| PersistenceError::ReconstructionError("Year out of range".to_string()))?;
        let month: u8 = u8::try_from(self.month)
            .map_err(|_| PersistenceError::ReconstructionError("Month out of range".to_string()))?;
        let period: ReportingPeriod = ReportingPeriod::new(year, month)
            .map_err(|e| PersistenceError::ReconstructionError(e.to_string()))?;
        let role: Role = self
            .role
            .parse()
            .map_err(|e| PersistenceError::ReconstructionError(format!("{e}")))?;
        let status: ReturnStatus = self
            .status
            .parse()
            .map_err(|e| PersistenceError::ReconstructionError(format!("{e}")))?;
        let sections: ReturnSections = serde_json::from_str(&self.sections_json)?;

        Ok(MonthlyReturn {
            return_id: Some(self.return_id),
            officer_id: OfficerId::new(self.officer_id),
            role,
            period,
            status,
            remarks: self.remarks,
            sections,
            submitted_at: Some(self.submitted_at),
        })
    }
}

/// Retrieves one officer's return for a period.
///
/// # Errors
///
/// Returns an error if the query fails or the row cannot be decoded.
/// Returns `Ok(None)` if nothing has been saved for that period.
pub fn get_return(
    conn: &mut SqliteConnection,
    officer_id: &OfficerId,
    period: ReportingPeriod,
) -> Result<Option<MonthlyReturn>, PersistenceError> {
    debug!("Looking up return of {} for {}", officer_id, period);

    let result: Result<ReturnRow, diesel::result::Error> = monthly_returns::table
        .filter(monthly_returns::officer_id.eq(officer_id.value()))
        .filter(monthly_returns::year.eq(i32::from(period.year())))
        .filter(monthly_returns::month.eq(i32::from(period.month())))
        .select(ReturnRow::as_select())
        .first(conn);

    match result {
        Ok(row) => row.into_return().map(Some),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(PersistenceError::from(e)),
    }
}

/// Lists every return filed for a period, in any status.
///
/// # Errors
///
/// Returns an error if the query fails or a row cannot be decoded.
pub fn list_returns_for_period(
    conn: &mut SqliteConnection,
    period: ReportingPeriod,
) -> Result<Vec<MonthlyReturn>, PersistenceError> {
    let rows: Vec<ReturnRow> = monthly_returns::table
        .filter(monthly_returns::year.eq(i32::from(period.year())))
        .filter(monthly_returns::month.eq(i32::from(period.month())))
        .select(ReturnRow::as_select())
        .order(monthly_returns::officer_id.asc())
        .load(conn)?;

    rows.into_iter().map(ReturnRow::into_return).collect()
}

/// Lists every return whose period lies in `from..=to`, oldest first.
///
/// # Errors
///
/// Returns an error if the query fails or a row cannot be decoded.
pub fn list_returns_between(
    conn: &mut SqliteConnection,
    from: ReportingPeriod,
    to: ReportingPeriod,
) -> Result<Vec<MonthlyReturn>, PersistenceError> {
    debug!("Listing returns from {} to {}", from, to);

    let rows: Vec<ReturnRow> = monthly_returns::table
        .filter(monthly_returns::year.between(i32::from(from.year()), i32::from(to.year())))
        .select(ReturnRow::as_select())
        .order((monthly_returns::year.asc(), monthly_returns::month.asc()))
        .load(conn)?;

    let mut returns: Vec<MonthlyReturn> = Vec::with_capacity(rows.len());
    for row in rows {
        let record: MonthlyReturn = row.into_return()?;
        if (from..=to).contains(&record.period) {
            returns.push(record);
        }
    }
    Ok(returns)
}

/// Lists all of one officer's returns, newest first.
///
/// # Errors
///
/// Returns an error if the query fails or a row cannot be decoded.
pub fn list_returns_for_officer(
    conn: &mut SqliteConnection,
    officer_id: &OfficerId,
) -> Result<Vec<MonthlyReturn>, PersistenceError> {
    let rows: Vec<ReturnRow> = monthly_returns::table
        .filter(monthly_returns::officer_id.eq(officer_id.value()))
        .select(ReturnRow::as_select())
        .order((monthly_returns::year.desc(), monthly_returns::month.desc()))
        .load(conn)?;

    rows.into_iter().map(ReturnRow::into_return).collect()
}

/// Lists the officers that have at least one Locked return.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_sealed_filers(
    conn: &mut SqliteConnection,
) -> Result<BTreeSet<OfficerId>, PersistenceError> {
    let ids: Vec<String> = monthly_returns::table
        .filter(monthly_returns::status.eq(ReturnStatus::Locked.as_str()))
        .select(monthly_returns::officer_id)
        .distinct()
        .load(conn)?;

    debug!(count = ids.len(), "Loaded officers with sealed returns");
    Ok(ids.into_iter().map(OfficerId::new).collect())
}
