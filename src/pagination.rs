use serde::{Deserialize, Deserializer};

pub const QUESTIONS_PER_PAGE: usize = 10;

#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    #[serde(default, deserialize_with = "deserialize_lenient_page")]
    pub page: Option<i64>,
}

// `?page=abc`, `?page=` and `?page=1.0` fall back to the first page
fn deserialize_lenient_page<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.and_then(|v| v.trim().parse::<i64>().ok()))
}

impl PageQuery {
    pub fn page(&self) -> i64 {
        self.page.unwrap_or(1)
    }
}

/// Returns the 1-based `page` of `items`. Pages past the end, and page
/// numbers below 1, give an empty slice.
pub fn paginate<T>(items: &[T], page: i64) -> &[T] {
    let Some(index) = page.checked_sub(1).and_then(|p| usize::try_from(p).ok()) else {
        return &[];
    };
    let start = index.saturating_mul(QUESTIONS_PER_PAGE);
    if start >= items.len() {
        return &[];
    }
    let end = start.saturating_add(QUESTIONS_PER_PAGE).min(items.len());
    &items[start..end]
}
