pub mod amount_delta;
pub mod constants;
pub mod decimal_math;
pub mod full_math;
pub mod path_key;
pub mod safe_cast;
pub mod tick_math;
