mod home;
pub use home::Home;

mod login;
pub use login::Login;

mod products;
pub use products::{EditProduct, NewProduct, ProductDetail, Products};
