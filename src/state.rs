/*
 * Responsibility
 * - shared context bound to the Router (AppState)
 *   - store (lifecycle owner), idea/comment services, id_codec
 * - cheap to Clone (Arc inside)
 */
use crate::repos::Store;
use crate::services::{CommentService, IdeaService, id_codec::IdCodec};

#[derive(Clone)]
pub struct AppState {
    pub store: Store,
    pub ideas: IdeaService,
    pub comments: CommentService,
    pub id_codec: IdCodec,
}

impl AppState {
    pub fn new(store: Store, id_codec: IdCodec) -> Self {
        let ideas = IdeaService::new(store.ideas.clone(), store.comments.clone());
        let comments = CommentService::new(store.ideas.clone(), store.comments.clone());
        Self {
            store,
            ideas,
            comments,
            id_codec,
        }
    }
}
