mod scalar;

mod option;

mod boxed;

mod collections;

mod time;
