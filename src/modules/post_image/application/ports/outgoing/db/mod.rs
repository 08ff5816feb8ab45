mod post_image_store;

pub use post_image_store::{
    ConditionalUpdateError, ImagesMutation, ImagesPrecondition, PostImageStore, PostImageUpdate,
};
