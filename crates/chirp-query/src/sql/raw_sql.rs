use super::types::BuiltQuery;

pub fn build_raw_sql(sql: String) -> BuiltQuery {
    BuiltQuery::Raw(sql)
}
