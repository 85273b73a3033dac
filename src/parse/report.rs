//! Plain-text rendering of [`ItemReport`]s for the terminal.

use std::fmt;

use crate::parse::ItemReport;
use crate::torn::ListingRecord;

impl fmt::Display for ItemReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let summary = &self.summary;

        writeln!(f, "{} ({})", self.name, self.item_id)?;
        writeln!(f, "  Average price:  {}", optional(summary.average_price.map(dollars)))?;
        writeln!(f, "  Median price:   {}", optional(summary.median_price.map(dollars)))?;
        writeln!(f, "  Std deviation:  {}", dollars(summary.std_dev))?;
        writeln!(f, "  Min price:      {}", optional(summary.min_price.map(price)))?;
        writeln!(f, "  Max price:      {}", optional(summary.max_price.map(price)))?;
        writeln!(
            f,
            "  Total quantity: {} across {} listing{}",
            thousands(summary.total_qty),
            summary.num_listings,
            if summary.num_listings == 1 { "" } else { "s" }
        )?;

        if self.listings.is_empty() {
            writeln!(f, "  No bazaar listings")?;
        } else {
            writeln!(f, "  Listings:")?;
            write_listings(f, &self.listings)?;
        }

        if let (Some(threshold), false) = (summary.outlier_threshold(), self.outliers.is_empty()) {
            writeln!(
                f,
                "  Listings below one standard deviation ({}):",
                dollars(threshold)
            )?;
            write_listings(f, &self.outliers)?;
        }

        if self.skipped > 0 {
            writeln!(f, "  Skipped {} malformed listing(s)", self.skipped)?;
        }
        Ok(())
    }
}

/// Renders every report, separated by a blank line.
pub fn render(reports: &[ItemReport]) -> String {
    reports
        .iter()
        .map(|r| r.to_string())
        .collect::<Vec<_>>()
        .join("\n")
}

fn write_listings(f: &mut fmt::Formatter<'_>, listings: &[ListingRecord]) -> fmt::Result {
    for listing in listings {
        writeln!(
            f,
            "    {} x {}",
            price(listing.cost),
            thousands(listing.quantity)
        )?;
    }
    Ok(())
}

fn optional(value: Option<String>) -> String {
    value.unwrap_or_else(|| "n/a".to_string())
}

/// Formats an amount as dollars and cents, eg. `$1,234,567.89`.
pub fn dollars(amount: f64) -> String {
    let sign = if amount < 0.0 { "-" } else { "" };
    let cents = (amount.abs() * 100.0).round() as u64;
    format!("{}${}.{:02}", sign, thousands(cents / 100), cents % 100)
}

/// Formats a listing price. Whole amounts drop the cents, eg. `$845,000`, anything
/// else is formatted like [`dollars`].
pub fn price(amount: f64) -> String {
    if amount.fract() == 0.0 && amount >= 0.0 && amount <= u64::MAX as f64 {
        format!("${}", thousands(amount as u64))
    } else {
        dollars(amount)
    }
}

fn thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
