//! Administrative endpoints. All of them require the admin token.

use actix_web::{web, Scope};

pub mod reindex;
pub mod session;
pub mod songs;


pub fn admin_router() -> Scope {
    web::scope("/admin")
        .service(songs::list_songs)
        .service(songs::upsert_song)
        .service(songs::delete_song)
        .service(reindex::rebuild_search_index)
        .service(session::create_admin_session)
}
