pub mod evaluation_ops;
pub mod num_traits_impls;
