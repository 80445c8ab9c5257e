//! HTTP API of the lyrics site: public search and song endpoints under `/api`,
//! administrative endpoints under `/api/admin` and a couple of root-level pages
//! (`/sitemap.xml`, `/robots.txt`).

use actix_web::{web, Scope};

pub mod admin;
pub mod errors;
pub mod health;
pub mod pages;
pub mod search;
pub mod song;
pub mod stats;
pub mod warm_cache;


/// Router for everything under `/api`.
pub fn api_router() -> Scope {
    web::scope("/api")
        .service(search::search_songs)
        .service(warm_cache::warm_search_cache)
        .service(song::get_song)
        .service(stats::get_stats)
        .service(health::health_check)
        .service(admin::admin_router())
}

/// Registers the pages served from the site root.
pub fn configure_pages(configuration: &mut web::ServiceConfig) {
    configuration
        .service(pages::sitemap::sitemap_xml)
        .service(pages::robots::robots_txt);
}
