pub mod config_ops;
pub mod dict_ops;
pub mod simulate_ops;
pub mod user_dict_ops;
