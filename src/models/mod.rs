pub mod jobmodel;
pub mod profilemodel;
pub mod usermodel;
