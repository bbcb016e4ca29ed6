//! 商品搜索条件构造
//!
//! 每个已填写的字段产生一个子句，子句之间用 `OR` 连接；价格区间两端都是
//! 开区间。参数值只通过占位符绑定，模板形状只取决于哪些字段存在。

use super::model::SearchFilter;
use crate::infrastructure::executor::SqlParam;

const SELECT_PRODUCTS: &str = "SELECT * FROM products";

/// `priceTo` 缺省时的上界
pub const PRICE_UPPER_SENTINEL: f64 = 999_999.0;

#[derive(Debug, Clone, PartialEq)]
pub enum FilterClause {
    TitleContains(String),
    DescriptionContains(String),
    PriceBetween { from: f64, to: f64 },
}

impl FilterClause {
    pub fn from_filter(filter: &SearchFilter) -> Vec<FilterClause> {
        let populated = |value: &Option<String>| value.clone().filter(|v| !v.is_empty());

        let mut clauses = Vec::new();
        if let Some(title) = populated(&filter.title) {
            clauses.push(FilterClause::TitleContains(title));
        }
        if let Some(description) = populated(&filter.description) {
            clauses.push(FilterClause::DescriptionContains(description));
        }
        if filter.price_from.is_some() || filter.price_to.is_some() {
            clauses.push(FilterClause::PriceBetween {
                from: filter.price_from.unwrap_or(0.0),
                to: filter.price_to.unwrap_or(PRICE_UPPER_SENTINEL),
            });
        }
        clauses
    }

    /// `first` 是本子句第一个占位符的序号（从 1 开始）
    pub fn render(&self, first: usize) -> (String, Vec<SqlParam>) {
        match self {
            FilterClause::TitleContains(title) => (
                format!("title ILIKE ${first}"),
                vec![SqlParam::from(format!("%{title}%"))],
            ),
            FilterClause::DescriptionContains(description) => (
                format!("description ILIKE ${first}"),
                vec![SqlParam::from(format!("%{description}%"))],
            ),
            FilterClause::PriceBetween { from, to } => (
                format!("(price > ${} AND price < ${})", first, first + 1),
                vec![SqlParam::from(*from), SqlParam::from(*to)],
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FilterQuery {
    pub sql: String,
    pub params: Vec<SqlParam>,
}

pub fn build_filter_query(filter: &SearchFilter) -> FilterQuery {
    let (conditions, params) = FilterClause::from_filter(filter).iter().fold(
        (Vec::new(), Vec::new()),
        |(mut conditions, mut params), clause| {
            let (condition, values) = clause.render(params.len() + 1);
            conditions.push(condition);
            params.extend(values);
            (conditions, params)
        },
    );

    let sql = if conditions.is_empty() {
        SELECT_PRODUCTS.to_string()
    } else {
        format!("{} WHERE {}", SELECT_PRODUCTS, conditions.join(" OR "))
    };

    FilterQuery { sql, params }
}
