mod modal_overlay;
pub use modal_overlay::ModalOverlay;

mod login;
pub use login::LoginView;

mod product_list;
pub use product_list::ProductListView;

mod product_detail;
pub use product_detail::ProductDetailView;

mod product_editor;
pub use product_editor::{EditProductView, NewProductView};
