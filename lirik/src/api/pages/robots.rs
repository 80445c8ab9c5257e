use actix_web::get;

use crate::api::errors::{EndpointResponseBuilder, EndpointResult};
use crate::state::ApplicationState;


fn robots_txt_contents(public_base_url: &str) -> String {
    format!(
        "User-agent: *\n\
        Allow: /\n\
        Disallow: /admin\n\
        Disallow: /api/admin\n\
        Sitemap: {public_base_url}/sitemap.xml\n"
    )
}


#[get("/robots.txt")]
pub async fn robots_txt(state: ApplicationState) -> EndpointResult {
    EndpointResponseBuilder::ok()
        .with_cache_control("public, max-age=86400")
        .with_raw_body(
            "text/plain; charset=utf-8",
            robots_txt_contents(&state.configuration.site.public_base_url),
        )
        .build()
}
