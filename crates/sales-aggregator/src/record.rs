use crate::error::NumberError;
use crate::numeric::{parse_decimal, parse_integer};

/// Number of columns a row needs before any aggregator will look at it
pub const RECORD_COLUMNS: usize = 5;

const DATE: usize = 0;
const ITEM: usize = 1;
const CATEGORY: usize = 2;
const QUANTITY: usize = 3;
const REVENUE: usize = 4;

/// One transaction row: `date, item, category, quantity, revenue`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record<'a> {
    /// 1-based line number in the source text, header included
    pub line: usize,
    pub fields: Vec<&'a str>,
}

impl<'a> Record<'a> {
    pub fn new(line: usize, fields: Vec<&'a str>) -> Self {
        Self { line, fields }
    }

    /// Rows with fewer than five columns are ignored by every aggregator.
    pub fn is_well_formed(&self) -> bool {
        self.fields.len() >= RECORD_COLUMNS
    }

    fn field(&self, index: usize) -> &'a str {
        self.fields.get(index).copied().unwrap_or_default()
    }

    pub fn date(&self) -> &'a str {
        self.field(DATE)
    }

    pub fn item(&self) -> &'a str {
        self.field(ITEM)
    }

    pub fn category(&self) -> &'a str {
        self.field(CATEGORY)
    }

    pub fn quantity(&self) -> Result<f64, NumberError> {
        parse_integer(self.field(QUANTITY))
    }

    pub fn revenue(&self) -> Result<f64, NumberError> {
        parse_decimal(self.field(REVENUE))
    }
}
