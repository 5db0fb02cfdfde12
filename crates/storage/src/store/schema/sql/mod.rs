#![forbid(unsafe_code)]

mod boards;
mod indexes;
mod posts;

pub(super) fn full_schema_sql() -> String {
    let mut sql = String::new();
    sql.push_str(boards::SQL);
    sql.push_str(posts::SQL);
    sql.push_str(indexes::SQL);
    sql
}
