//! Text rendering of page state.
//!
//! Every renderer is a pure function of controller state, so what a page
//! shows can be asserted directly in tests.

use crate::app::Page;
use crate::controller::{DetailController, FeedController, FeedKind, MovieController, SearchController};
use crate::error::ViewError;
use shared::AnimeSummary;

const RULE: &str = "----------------------------------------";

pub fn render_page(page: &Page) -> String {
    match page {
        Page::Feed(feed) => render_feed(feed),
        Page::Search(search) => render_search(search),
        Page::Detail(detail) => render_detail(detail),
        Page::Movies(movies) => render_movies(movies),
    }
}

/// One numbered card line; `open <n>` uses the same numbering
pub fn render_card(number: usize, anime: &AnimeSummary) -> String {
    let mut line = format!("{number:>3}. {}", anime.title);
    let mut tags = Vec::new();
    if let Some(chapter) = &anime.last_chapter_label {
        tags.push(chapter.clone());
    }
    if let Some(status) = &anime.status {
        tags.push(status.clone());
    }
    if let Some(score) = anime.display_score() {
        tags.push(format!("★ {score}"));
    }
    // Release text reads like "Jan 10, 2024"; the part before the comma is enough
    if let Some(release) = anime.release_info.as_deref().and_then(|r| r.split(',').next()) {
        if !release.trim().is_empty() {
            tags.push(release.trim().to_string());
        }
    }
    if let Some(total) = anime.total_episodes {
        tags.push(format!("{total} episodes"));
    }
    if let Some(updated) = &anime.last_update_label {
        tags.push(updated.clone());
    }
    if !tags.is_empty() {
        line.push_str("  [");
        line.push_str(&tags.join(" | "));
        line.push(']');
    }
    if !anime.genres.is_empty() {
        let mut genres = anime.genres.iter().take(2).cloned().collect::<Vec<_>>().join(", ");
        if anime.genres.len() > 2 {
            genres.push_str(&format!(" +{}", anime.genres.len() - 2));
        }
        line.push_str(&format!("  ({genres})"));
    }
    line
}

fn push_cards(lines: &mut Vec<String>, items: &[AnimeSummary]) {
    lines.extend(items.iter().enumerate().map(|(i, a)| render_card(i + 1, a)));
}

fn retry_hint(lines: &mut Vec<String>, message: &str) {
    lines.push(message.to_string());
    lines.push("[Coba Lagi]  ketik `retry`".to_string());
}

pub fn render_feed(feed: &FeedController) -> String {
    let mut lines = Vec::new();

    match feed.kind() {
        FeedKind::Home => {
            lines.push("Jelajahi Dunia Anime Tanpa Batas".to_string());
            lines.push(RULE.to_string());
            if !feed.featured().is_empty() {
                lines.push("Featured Anime".to_string());
                for anime in feed.featured() {
                    lines.push(format!("  * {}", anime.title));
                }
                lines.push(String::new());
            }
            lines.push("Anime Terbaru".to_string());
        }
        FeedKind::Latest => {
            lines.push("Anime Terbaru".to_string());
            lines.push("Update anime terbaru setiap hari".to_string());
            lines.push(RULE.to_string());
        }
    }

    if feed.is_loading() && feed.items().is_empty() {
        lines.push("Loading...".to_string());
        return lines.join("\n");
    }

    push_cards(&mut lines, feed.items());

    if let Some(error) = feed.error() {
        lines.push(String::new());
        retry_hint(&mut lines, &feed_error_message(error));
    }

    if feed.is_loading() {
        lines.push("Loading...".to_string());
    } else if feed.has_more() && !feed.items().is_empty() {
        lines.push(String::new());
        lines.push("[Load More]  ketik `more`".to_string());
    }
    lines.join("\n")
}

fn feed_error_message(error: &ViewError) -> String {
    match error {
        ViewError::Network { .. } => "Gagal memuat anime terbaru. Silakan coba lagi.".to_string(),
        other => other.to_string(),
    }
}

pub fn render_search(search: &SearchController) -> String {
    let mut lines = vec![format!("Cari Anime: {}", search.input()), RULE.to_string()];

    if search.query().trim().is_empty() {
        lines.push("Masukkan judul anime...".to_string());
        return lines.join("\n");
    }
    if search.is_loading() {
        lines.push("Mencari...".to_string());
        return lines.join("\n");
    }
    if search.error().is_some() {
        retry_hint(&mut lines, "Gagal mencari anime. Silakan coba lagi.");
        return lines.join("\n");
    }

    lines.push(format!("Hasil untuk \"{}\"", search.query()));
    lines.push(format!("{} hasil", search.total_results()));

    if search.items().is_empty() {
        lines.push("Tidak ada hasil ditemukan".to_string());
        lines.push("[Kembali ke Beranda]  ketik `home`".to_string());
        return lines.join("\n");
    }

    push_cards(&mut lines, search.items());

    if search.shows_pagination() {
        let prev = if search.can_go_previous() { "< prev" } else { "  ----" };
        let next = if search.can_go_next() { "next >" } else { "----  " };
        lines.push(String::new());
        lines.push(format!(
            "{prev}   Halaman {} / {}   {next}",
            search.page(),
            search.total_pages()
        ));
    }
    lines.join("\n")
}

pub fn render_detail(page: &DetailController) -> String {
    let mut lines = Vec::new();

    if page.is_loading() {
        lines.push("Loading...".to_string());
        return lines.join("\n");
    }

    let Some(detail) = page.detail() else {
        let message = match page.error() {
            Some(ViewError::InvalidId) => "ID anime tidak valid",
            Some(ViewError::Network { .. }) => "Gagal memuat detail anime. Silakan coba lagi.",
            _ => "Anime tidak ditemukan",
        };
        if page.error().is_some_and(ViewError::is_network) {
            retry_hint(&mut lines, message);
        } else {
            lines.push(message.to_string());
        }
        lines.push("[Kembali ke Beranda]  ketik `home`".to_string());
        return lines.join("\n");
    };

    lines.push(detail.title.clone());
    lines.push(RULE.to_string());
    lines.push(format!("Rating: {}", detail.rating));
    lines.push(format!("Status: {}", detail.status));
    lines.push(format!("Type: {}", detail.kind));
    lines.push(format!("{} Episode", detail.chapters.len()));
    if !detail.published.is_empty() {
        lines.push(format!("Rilis: {}", detail.published));
    }
    if !detail.author.is_empty() {
        lines.push(format!("Studio: {}", detail.author));
    }
    if !detail.genres.is_empty() {
        lines.push(format!("Genre: {}", detail.genres.join(", ")));
    }
    lines.push(String::new());
    lines.push("Sinopsis".to_string());
    if detail.synopsis.trim().is_empty() {
        lines.push("Tidak ada sinopsis tersedia.".to_string());
    } else {
        lines.push(detail.synopsis.trim().to_string());
    }

    if let Some(chapter) = page.selected_chapter() {
        lines.push(String::new());
        lines.push(format!("Episode {}", chapter.label));
        match page.video().and_then(|v| v.primary_stream()) {
            Some(stream) => lines.push(format!("Putar: {} ({})", stream.link, stream.resolution)),
            None if page.is_video_unavailable() => lines.push("Video tidak tersedia".to_string()),
            None => lines.push("Memuat video...".to_string()),
        }
        if let Some(video) = page.video() {
            if !video.available_resolutions.is_empty() {
                let choices: Vec<String> = video
                    .available_resolutions
                    .iter()
                    .map(|r| {
                        if r == page.selected_resolution() {
                            format!("[{r}]")
                        } else {
                            r.clone()
                        }
                    })
                    .collect();
                lines.push(format!("Kualitas: {}", choices.join(" ")));
            }
        }
    }

    lines.push(String::new());
    lines.push("Daftar Episode".to_string());
    if detail.chapters.is_empty() {
        lines.push("Tidak ada episode tersedia".to_string());
    }
    let selected = page.selected_chapter().map(|c| c.id);
    for (i, chapter) in detail.chapters.iter().enumerate() {
        let marker = if Some(chapter.id) == selected { '>' } else { ' ' };
        let date = if chapter.date.trim().is_empty() {
            "Tanggal tidak tersedia"
        } else {
            chapter.date.as_str()
        };
        lines.push(format!("{marker}{:>3}. Episode {}  ({date})", i + 1, chapter.label));
    }
    lines.join("\n")
}

pub fn render_movies(page: &MovieController) -> String {
    let mut lines = vec![
        "Anime Movies".to_string(),
        "Koleksi film anime berkualitas tinggi".to_string(),
        RULE.to_string(),
    ];

    if page.is_loading() {
        lines.push("Memuat...".to_string());
        return lines.join("\n");
    }
    if page.error().is_some() {
        retry_hint(&mut lines, "Gagal memuat data movie. Silakan coba lagi.");
        return lines.join("\n");
    }
    if page.movies().is_empty() {
        lines.push("Tidak Ada Movie".to_string());
        return lines.join("\n");
    }

    lines.push(format!("Menampilkan {} movie", page.movies().len()));
    push_cards(&mut lines, &page.cards());
    lines.join("\n")
}

/// Fallback screen shown after a command panicked
pub fn render_crash(reason: &str) -> String {
    [
        "Oops! Terjadi kesalahan",
        RULE,
        reason,
        "",
        "[Muat Ulang]  ketik `reload`",
    ]
    .join("\n")
}

pub fn help_text() -> String {
    [
        "Perintah:",
        "  go <route>      buka route, mis. /search?q=naruto",
        "  home | latest | movies",
        "  search <teks>   cari anime",
        "  next | prev     halaman hasil pencarian",
        "  more            muat halaman berikutnya",
        "  refresh         muat ulang dari halaman pertama",
        "  retry           ulangi permintaan yang gagal",
        "  open <n>        buka kartu ke-n",
        "  ep <n>          putar episode ke-n",
        "  reso <r>        ganti kualitas video, mis. 1080p",
        "  reload          muat ulang halaman",
        "  help | quit",
    ]
    .join("\n")
}
