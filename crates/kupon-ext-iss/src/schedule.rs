//! Bondization tables: coupon cursor, coupon pages, amortizations.

use serde_json::Value;

use kupon_core::{Amortization, Coupon};
use kupon_traits::error::{SourceError, SourceResult};
use kupon_traits::CouponCursor;

use crate::table::{decode_rows, Column, ColumnKind::*, TableSchema};

pub(crate) const CURSOR_TABLE: &str = "coupons.cursor";
pub(crate) const COUPON_TABLE: &str = "coupons";
pub(crate) const AMORTIZATION_TABLE: &str = "amortizations";

/// `coupons.cursor`: `INDEX, TOTAL, PAGESIZE`.
pub const CURSOR_SCHEMA: TableSchema = TableSchema {
    table: CURSOR_TABLE,
    columns: &[
        Column::new(0, "INDEX", Integer),
        Column::new(1, "TOTAL", Integer),
        Column::new(2, "PAGESIZE", Integer),
    ],
};

/// `coupons` page rows.
pub const COUPON_SCHEMA: TableSchema = TableSchema {
    table: COUPON_TABLE,
    columns: &[
        Column::new(0, "isin", Text),
        Column::new(3, "coupondate", Text),
        Column::new(4, "recorddate", OptText),
        Column::new(6, "initialfacevalue", Number),
        Column::new(7, "facevalue", Number),
        Column::new(8, "faceunit", Text),
        Column::new(9, "value", OptNumber),
        Column::new(10, "valueprc", OptNumber),
        Column::new(11, "value_rub", OptNumber),
    ],
};

/// `amortizations` rows.
pub const AMORTIZATION_SCHEMA: TableSchema = TableSchema {
    table: AMORTIZATION_TABLE,
    columns: &[
        Column::new(0, "isin", Text),
        Column::new(3, "amortdate", Text),
        Column::new(4, "facevalue", Number),
        Column::new(5, "initialfacevalue", Number),
        Column::new(6, "faceunit", Text),
        Column::new(8, "value", Number),
        Column::new(9, "value_rub", OptNumber),
    ],
};

pub(crate) fn bondization_path(isin: &str) -> String {
    format!("statistics/engines/stock/markets/bonds/bondization/{isin}.json")
}

/// Reads the pagination cursor.
///
/// # Errors
///
/// `MalformedSchedule` if the cursor table has no row (or a short one).
pub fn parse_cursor(document: &Value) -> SourceResult<CouponCursor> {
    let rows = decode_rows(document, CURSOR_SCHEMA)?;
    let row = rows
        .first()
        .ok_or_else(|| SourceError::malformed("coupon cursor has no rows"))?;
    Ok(CouponCursor::new(
        row.integer("INDEX"),
        row.integer("TOTAL"),
        row.integer("PAGESIZE"),
    ))
}

/// Reads one page of coupons.
pub fn parse_coupons(document: &Value) -> SourceResult<Vec<Coupon>> {
    Ok(decode_rows(document, COUPON_SCHEMA)?
        .into_iter()
        .map(|row| Coupon {
            isin: row.text("isin"),
            coupon_date: row.text("coupondate"),
            record_date: row.opt_text("recorddate"),
            initial_face_value: row.number("initialfacevalue"),
            face_value: row.number("facevalue"),
            face_unit: row.text("faceunit"),
            value: row.opt_number("value"),
            value_prc: row.opt_number("valueprc"),
            value_rub: row.opt_number("value_rub"),
        })
        .collect())
}

/// Reads the amortization schedule.
pub fn parse_amortizations(document: &Value) -> SourceResult<Vec<Amortization>> {
    Ok(decode_rows(document, AMORTIZATION_SCHEMA)?
        .into_iter()
        .map(|row| Amortization {
            isin: row.text("isin"),
            amort_date: row.text("amortdate"),
            face_value: row.number("facevalue"),
            initial_face_value: row.number("initialfacevalue"),
            face_unit: row.text("faceunit"),
            value: row.number("value"),
            value_rub: row.opt_number("value_rub"),
        })
        .collect())
}
