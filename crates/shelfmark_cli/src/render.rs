//! Console rendering for catalog records.

use shelfmark_core::{CatalogError, Item, Loan, LoanStatus};

const RATING_GLYPH: char = '*';
const RATING_MAX: i32 = 5;

pub fn item(item: &Item) -> String {
    format!(
        "ID: {}\nTitle: {}\nAuthor: {}\nPublished: {}\nRating: {}\nFeatured: {}\nAttribute: {}\n---",
        item.id,
        item.title,
        item.author,
        item.year
            .map_or_else(|| "unknown".to_string(), |year| year.to_string()),
        rating(item.rating),
        featured(item.featured),
        item.attribute.as_deref().unwrap_or("-"),
    )
}

/// Renders a rating as repeated glyphs, clamped to the 0-5 display scale.
pub fn rating(rating: Option<i32>) -> String {
    match rating {
        Some(value) => {
            let count = value.clamp(0, RATING_MAX) as usize;
            std::iter::repeat(RATING_GLYPH).take(count).collect()
        }
        None => "unrated".to_string(),
    }
}

pub fn featured(featured: Option<bool>) -> &'static str {
    if featured.unwrap_or(false) {
        "Yes"
    } else {
        "No"
    }
}

pub fn loan(loan: &Loan) -> String {
    let item = loan
        .item_id
        .map_or_else(|| "cleared".to_string(), |id| id.to_string());
    let state = match loan.status() {
        LoanStatus::Open => "open".to_string(),
        LoanStatus::Closed => format!(
            "returned {}",
            loan.returned_on.as_deref().unwrap_or_default()
        ),
    };
    format!(
        "loan {} | item {} | {} since {} | {}",
        loan.id, item, loan.borrower, loan.borrowed_on, state
    )
}

/// One-line message for a failed operation.
pub fn error(err: &CatalogError) -> String {
    match err {
        CatalogError::NotFound(missing) => format!("Not found: {missing}"),
        CatalogError::Conflict(conflict) => format!("Nothing changed: {conflict}"),
        CatalogError::Invalid(reason) => format!("Invalid input: {reason}"),
        other => format!("Error: {other}"),
    }
}

#[cfg(test)]
mod tests {
    use super::{featured, loan, rating};
    use shelfmark_core::Loan;

    #[test]
    fn rating_is_clamped_to_display_scale() {
        assert_eq!(rating(Some(3)), "***");
        assert_eq!(rating(Some(9)), "*****");
        assert_eq!(rating(Some(-2)), "");
        assert_eq!(rating(None), "unrated");
    }

    #[test]
    fn featured_defaults_to_no() {
        assert_eq!(featured(Some(true)), "Yes");
        assert_eq!(featured(None), "No");
    }

    #[test]
    fn loan_line_shows_return_state() {
        let mut record = Loan {
            id: 4,
            borrower: "Alice".to_string(),
            borrowed_on: "05/01/2024".to_string(),
            returned_on: None,
            item_id: Some(2),
        };
        assert!(loan(&record).ends_with("| open"));

        record.returned_on = Some("05/09/2024".to_string());
        record.item_id = None;
        let line = loan(&record);
        assert!(line.contains("item cleared"));
        assert!(line.ends_with("returned 05/09/2024"));
    }
}
