//! Security static data, market quote, dividends.

use serde_json::Value;
use tracing::warn;

use kupon_core::{Bond, Dividend, MarketQuote};
use kupon_traits::error::SourceResult;

use crate::table::{decode_rows, Column, ColumnKind::*, TableSchema};

/// Columns requested with `securities.columns=`, in this order.
pub const BOND_COLUMNS: &str = "ISIN,SHORTNAME,ACCRUEDINT,FACEVALUE,MATDATE,COUPONPERIOD,\
COUPONPERCENT,SECNAME,FACEUNIT,OFFERDATE,SETTLEDATE,COUPONVALUE";

/// `securities` rows restricted to [`BOND_COLUMNS`].
pub const BOND_SCHEMA: TableSchema = TableSchema {
    table: "securities",
    columns: &[
        Column::new(0, "ISIN", OptText),
        Column::new(1, "SHORTNAME", OptText),
        Column::new(2, "ACCRUEDINT", OptNumber),
        Column::new(3, "FACEVALUE", OptNumber),
        Column::new(4, "MATDATE", OptText),
        Column::new(5, "COUPONPERIOD", OptNumber),
        Column::new(6, "COUPONPERCENT", OptNumber),
        Column::new(7, "SECNAME", OptText),
        Column::new(8, "FACEUNIT", OptText),
        Column::new(9, "OFFERDATE", OptText),
        Column::new(10, "SETTLEDATE", OptText),
        Column::new(11, "COUPONVALUE", OptNumber),
    ],
};

/// `marketdata` restricted to `LAST`.
pub const QUOTE_SCHEMA: TableSchema = TableSchema {
    table: "marketdata",
    columns: &[Column::new(0, "LAST", OptNumber)],
};

/// `dividends` rows.
pub const DIVIDEND_SCHEMA: TableSchema = TableSchema {
    table: "dividends",
    columns: &[
        Column::new(0, "secid", Text),
        Column::new(1, "isin", Text),
        Column::new(2, "registryclosedate", Text),
        Column::new(3, "value", Number),
        Column::new(4, "currencyid", Text),
    ],
};

/// Reads bond static data. The exchange may list the bond on several
/// boards; the last row wins. `None` when there is no row at all.
pub fn parse_bond(document: &Value, isin: &str) -> SourceResult<Option<Bond>> {
    let rows = decode_rows(document, BOND_SCHEMA)?;
    let Some(row) = rows.last() else {
        return Ok(None);
    };

    let mut bond = Bond {
        isin: row.text("ISIN"),
        short_name: row.text("SHORTNAME"),
        accrued_int: row.number("ACCRUEDINT"),
        face_value: row.number("FACEVALUE"),
        mat_date: row.text("MATDATE"),
        coupon_period: row.number("COUPONPERIOD") as i32,
        coupon_percent: row.number("COUPONPERCENT"),
        coupon_value: row.number("COUPONVALUE"),
        sec_name: row.text("SECNAME"),
        face_unit: row.text("FACEUNIT"),
        offer_date: row.opt_text("OFFERDATE"),
        settle_date: row.opt_text("SETTLEDATE"),
    };
    if bond.isin.is_empty() {
        bond.isin = isin.to_string();
    }
    if rows.len() > 1 {
        warn!(isin, rows = rows.len(), "several security rows, using the last one");
    }
    Ok(Some(bond))
}

/// Reads the last trade price. No row at all, or a null cell in any row,
/// means the exchange has no last price.
pub fn parse_quote(document: &Value) -> SourceResult<MarketQuote> {
    let rows = decode_rows(document, QUOTE_SCHEMA)?;
    if rows.iter().any(|row| row.opt_number("LAST").is_none()) {
        return Ok(MarketQuote::absent());
    }
    let last_price = rows.last().and_then(|row| row.opt_number("LAST"));
    Ok(MarketQuote { last_price })
}

/// Reads declared dividends.
pub fn parse_dividends(document: &Value) -> SourceResult<Vec<Dividend>> {
    Ok(decode_rows(document, DIVIDEND_SCHEMA)?
        .into_iter()
        .map(|row| Dividend {
            secid: row.text("secid"),
            isin: row.text("isin"),
            registry_close_date: row.text("registryclosedate"),
            value: row.number("value"),
            currency: row.text("currencyid"),
        })
        .collect())
}
