//! Query-string builder for the REST endpoint's filter syntax
//! (`column=op.value`, `select=`, `order=`, `limit=`, `offset=`).

/// Rows fetched per request when listing a table.
pub const PAGE_SIZE: usize = 1000;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RestQuery {
    select: Option<String>,
    filters: Vec<(String, String)>,
    order: Vec<String>,
    limit: Option<usize>,
    offset: Option<usize>,
}

impl RestQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select(mut self, columns: &str) -> Self {
        self.select = Some(columns.to_string());
        self
    }

    fn filter(mut self, column: &str, op: &str, value: &str) -> Self {
        self.filters
            .push((column.to_string(), format!("{}.{}", op, value)));
        self
    }

    pub fn eq(self, column: &str, value: impl ToString) -> Self {
        self.filter(column, "eq", &value.to_string())
    }

    pub fn gte(self, column: &str, value: impl ToString) -> Self {
        self.filter(column, "gte", &value.to_string())
    }

    pub fn lte(self, column: &str, value: impl ToString) -> Self {
        self.filter(column, "lte", &value.to_string())
    }

    fn order(mut self, columns: &[&str], direction: &str) -> Self {
        self.order
            .extend(columns.iter().map(|c| format!("{}.{}", c, direction)));
        self
    }

    /// Appends descending sort keys, most significant first. Paged reads
    /// need the keys to be unique per row or rows can repeat across pages.
    pub fn order_desc(self, columns: &[&str]) -> Self {
        self.order(columns, "desc")
    }

    pub fn order_asc(self, columns: &[&str]) -> Self {
        self.order(columns, "asc")
    }

    pub fn page(mut self, limit: usize, offset: usize) -> Self {
        self.limit = Some(limit);
        self.offset = Some(offset);
        self
    }

    pub fn has_filters(&self) -> bool {
        !self.filters.is_empty()
    }

    /// Encoded query string without the leading `?`.
    pub fn to_query_string(&self) -> String {
        let mut params: Vec<String> = Vec::new();
        if let Some(select) = &self.select {
            params.push(format!("select={}", urlencoding::encode(select)));
        }
        for (column, condition) in &self.filters {
            params.push(format!(
                "{}={}",
                urlencoding::encode(column),
                urlencoding::encode(condition)
            ));
        }
        if !self.order.is_empty() {
            params.push(format!(
                "order={}",
                urlencoding::encode(&self.order.join(","))
            ));
        }
        if let Some(limit) = self.limit {
            params.push(format!("limit={}", limit));
        }
        if let Some(offset) = self.offset {
            params.push(format!("offset={}", offset));
        }
        params.join("&")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_filters_render_in_insertion_order() {
        let query = RestQuery::new()
            .select("*")
            .eq("user_id", "u-1")
            .gte("date", NaiveDate::from_ymd_opt(2025, 3, 1).unwrap())
            .lte("date", NaiveDate::from_ymd_opt(2025, 3, 31).unwrap())
            .order_desc(&["date"]);

        assert_eq!(
            query.to_query_string(),
            "select=%2A&user_id=eq.u-1&date=gte.2025-03-01&date=lte.2025-03-31&order=date.desc"
        );
    }

    #[test]
    fn test_order_keys_render_with_tiebreak_before_paging() {
        let query = RestQuery::new()
            .order_desc(&["date", "id"])
            .page(PAGE_SIZE, 1000);
        assert_eq!(
            query.to_query_string(),
            "order=date.desc%2Cid.desc&limit=1000&offset=1000"
        );

        let mixed = RestQuery::new()
            .order_asc(&["created_at"])
            .order_desc(&["id"]);
        assert_eq!(mixed.to_query_string(), "order=created_at.asc%2Cid.desc");
    }

    #[test]
    fn test_values_are_encoded() {
        let query = RestQuery::new().eq("title", "rent & bills");
        assert_eq!(query.to_query_string(), "title=eq.rent%20%26%20bills");
    }

    #[test]
    fn test_paging() {
        let query = RestQuery::new().select("user_id,created_at").page(PAGE_SIZE, 2000);
        assert_eq!(
            query.to_query_string(),
            "select=user_id%2Ccreated_at&limit=1000&offset=2000"
        );
    }

    #[test]
    fn test_empty_query() {
        let query = RestQuery::new();
        assert!(!query.has_filters());
        assert_eq!(query.to_query_string(), "");
    }
}
