mod auth_test;
mod courses_test;
mod reviews_test;
