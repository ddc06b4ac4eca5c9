pub mod number_util;
