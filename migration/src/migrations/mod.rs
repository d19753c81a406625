pub mod m202610010001_create_users;
pub mod m202610010002_create_user_permissions;
pub mod m202610010003_create_courses;
pub mod m202610010004_create_reviews;
