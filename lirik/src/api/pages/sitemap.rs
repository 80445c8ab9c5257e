use std::fmt::Write;

use actix_web::get;
use chrono::{DateTime, SecondsFormat, Utc};
use itertools::Itertools;
use lirik_database::entities::{SongQuery, SongSummaryModel};

use crate::api::errors::{EndpointResponseBuilder, EndpointResult};
use crate::state::ApplicationState;


const SITEMAP_SONG_LIMIT: u32 = 500;

const SITEMAP_CACHE_CONTROL: &str = "public, max-age=3600, stale-while-revalidate=86400";


struct SitemapEntry {
    location: String,
    last_modified_at: Option<DateTime<Utc>>,
}

fn escape_xml(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());

    for character in value.chars() {
        match character {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            other => escaped.push(other),
        }
    }

    escaped
}

fn render_sitemap(entries: &[SitemapEntry]) -> String {
    let urls = entries
        .iter()
        .map(|entry| {
            let mut url = format!("<url><loc>{}</loc>", escape_xml(&entry.location));

            if let Some(last_modified_at) = entry.last_modified_at {
                // Writing into a `String` can't fail.
                let _ = write!(
                    url,
                    "<lastmod>{}</lastmod>",
                    last_modified_at.to_rfc3339_opts(SecondsFormat::Millis, true)
                );
            }

            url.push_str("</url>");
            url
        })
        .join("");

    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
        <urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n\
        {urls}\n\
        </urlset>"
    )
}

fn song_sitemap_entry(public_base_url: &str, song: SongSummaryModel) -> SitemapEntry {
    SitemapEntry {
        location: format!("{}/song/{}", public_base_url, song.slug),
        last_modified_at: song
            .updated_at
            .and_then(|updated_at| DateTime::from_timestamp(updated_at, 0)),
    }
}


/// XML sitemap: the site root plus the 500 most recently updated songs.
#[get("/sitemap.xml")]
pub async fn sitemap_xml(state: ApplicationState) -> EndpointResult {
    let public_base_url = state.configuration.site.public_base_url.as_str();

    let mut database_connection = state.acquire_database_connection().await?;
    let songs = SongQuery::recently_updated(&mut database_connection, SITEMAP_SONG_LIMIT).await?;
    drop(database_connection);

    let mut entries = Vec::with_capacity(songs.len() + 1);
    entries.push(SitemapEntry {
        location: format!("{public_base_url}/"),
        last_modified_at: Some(Utc::now()),
    });
    entries.extend(
        songs
            .into_iter()
            .map(|song| song_sitemap_entry(public_base_url, song)),
    );

    EndpointResponseBuilder::ok()
        .with_cache_control(SITEMAP_CACHE_CONTROL)
        .with_raw_body(
            "application/xml; charset=utf-8",
            render_sitemap(&entries),
        )
        .build()
}



#[cfg(test)]
mod tests {
    use lirik_core::id::SongId;

    use super::*;

    #[test]
    fn renders_song_entries_with_last_modification_time() {
        let song = SongSummaryModel {
            id: SongId::new("abc"),
            slug: "kasih-setiamu".to_string(),
            title: "Kasih SetiaMu".to_string(),
            artist: None,
            language: "id".to_string(),
            updated_at: Some(0),
        };

        let sitemap = render_sitemap(&[song_sitemap_entry(
            "https://lirikrohani.com",
            song,
        )]);

        assert!(sitemap.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n"));
        assert!(sitemap.contains(
            "<url><loc>https://lirikrohani.com/song/kasih-setiamu</loc>\
            <lastmod>1970-01-01T00:00:00.000Z</lastmod></url>"
        ));
        assert!(sitemap.ends_with("</urlset>"));
    }

    #[test]
    fn escapes_locations() {
        assert_eq!(escape_xml("a&b<c>"), "a&amp;b&lt;c&gt;");
    }
}
