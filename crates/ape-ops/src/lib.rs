pub mod ops_context;
pub mod ops_equation;
pub mod ops_graph;
pub mod ops_info;
pub mod ops_order;
pub mod ops_validate;
