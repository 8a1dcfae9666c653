use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::{ResearchError, ResearchResult};

/// Award-amount buckets offered by the table filter. Lower bound inclusive,
/// upper bound exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AmountRange {
    #[serde(rename = "under500k")]
    Under500K,
    #[serde(rename = "500k-1m")]
    From500KTo1M,
    #[serde(rename = "1m-5m")]
    From1MTo5M,
    #[serde(rename = "5m-10m")]
    From5MTo10M,
    #[serde(rename = "over10m")]
    Over10M,
}

impl AmountRange {
    pub const ALL: [AmountRange; 5] = [
        AmountRange::Under500K,
        AmountRange::From500KTo1M,
        AmountRange::From1MTo5M,
        AmountRange::From5MTo10M,
        AmountRange::Over10M,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            AmountRange::Under500K => "under500k",
            AmountRange::From500KTo1M => "500k-1m",
            AmountRange::From1MTo5M => "1m-5m",
            AmountRange::From5MTo10M => "5m-10m",
            AmountRange::Over10M => "over10m",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AmountRange::Under500K => "Under $500K",
            AmountRange::From500KTo1M => "$500K - $1M",
            AmountRange::From1MTo5M => "$1M - $5M",
            AmountRange::From5MTo10M => "$5M - $10M",
            AmountRange::Over10M => "Over $10M",
        }
    }

    /// `(min, max)` where `max` is exclusive and `None` means unbounded
    pub fn bounds(&self) -> (f64, Option<f64>) {
        match self {
            AmountRange::Under500K => (0.0, Some(500_000.0)),
            AmountRange::From500KTo1M => (500_000.0, Some(1_000_000.0)),
            AmountRange::From1MTo5M => (1_000_000.0, Some(5_000_000.0)),
            AmountRange::From5MTo10M => (5_000_000.0, Some(10_000_000.0)),
            AmountRange::Over10M => (10_000_000.0, None),
        }
    }

    pub fn contains(&self, amount: f64) -> bool {
        let (min, max) = self.bounds();
        amount >= min && max.map_or(true, |max| amount < max)
    }
}

impl FromStr for AmountRange {
    type Err = ResearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim();
        AmountRange::ALL
            .into_iter()
            .find(|range| range.key().eq_ignore_ascii_case(key))
            .ok_or_else(|| ResearchError::UnknownAmountRange(key.to_string()))
    }
}

impl fmt::Display for AmountRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Rows per table page. Only the sizes offered in the UI are accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PageSize(u64);

impl PageSize {
    pub const OPTIONS: [u64; 4] = [10, 25, 50, 100];

    pub fn new(size: u64) -> ResearchResult<Self> {
        if Self::OPTIONS.contains(&size) {
            Ok(PageSize(size))
        } else {
            Err(ResearchError::InvalidPageSize(size))
        }
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl Default for PageSize {
    fn default() -> Self {
        PageSize(25)
    }
}

/// Raw query-string parameters for the research table
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResearchQueryParams {
    pub search: Option<String>,
    pub award_instrument: Option<String>,
    pub amount_range: Option<String>,
    pub page: Option<u64>,
    pub page_size: Option<u64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResearchQuery {
    pub search: Option<String>,
    pub award_instrument: Option<String>,
    pub amount_range: Option<AmountRange>,
    pub page: u64,
    pub page_size: PageSize,
}

impl Default for ResearchQuery {
    fn default() -> Self {
        Self {
            search: None,
            award_instrument: None,
            amount_range: None,
            page: 1,
            page_size: PageSize::default(),
        }
    }
}

impl ResearchQuery {
    /// Validate raw parameters. Blank strings count as "no filter".
    pub fn from_params(
        params: &ResearchQueryParams,
        default_page_size: PageSize,
    ) -> ResearchResult<Self> {
        let amount_range = match non_blank(params.amount_range.as_deref()) {
            Some(key) => Some(key.parse::<AmountRange>()?),
            None => None,
        };

        let page_size = match params.page_size {
            Some(size) => PageSize::new(size)?,
            None => default_page_size,
        };

        let page = params.page.unwrap_or(1);
        check_page(page, page_size)?;

        Ok(Self {
            search: non_blank(params.search.as_deref()),
            award_instrument: non_blank(params.award_instrument.as_deref()),
            amount_range,
            page,
            page_size,
        })
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// One page of rows plus the total match count
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total_count: u64,
    pub page: u64,
    pub page_size: u64,
    pub total_pages: u64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total_count: u64, page: u64, page_size: u64) -> Self {
        Self {
            items,
            total_count,
            page,
            page_size,
            total_pages: total_pages(total_count, page_size),
        }
    }
}

/// Row offset of a 1-based page, or `None` when page 0 or the offset does not fit
/// in a SQLite integer
pub fn page_offset(page: u64, page_size: PageSize) -> Option<u64> {
    page.checked_sub(1)?
        .checked_mul(page_size.get())
        .filter(|offset| *offset <= i64::MAX as u64)
}

pub fn check_page(page: u64, page_size: PageSize) -> ResearchResult<()> {
    match page_offset(page, page_size) {
        Some(_) => Ok(()),
        None => Err(ResearchError::InvalidPage(page)),
    }
}

pub fn total_pages(total_count: u64, page_size: u64) -> u64 {
    if page_size == 0 {
        return 0;
    }
    total_count.div_ceil(page_size)
}
