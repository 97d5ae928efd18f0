pub mod column;
pub mod constraint;
pub mod names;
pub mod primary_key;
pub mod reference;

pub use column::{ColumnDef, ColumnType, ComplexColumnType, SimpleColumnType};
pub use constraint::TableConstraint;
pub use names::{ColumnName, IndexName, TableName};
pub use primary_key::{PrimaryKeyDef, PrimaryKeySyntax};
pub use reference::ReferenceAction;
