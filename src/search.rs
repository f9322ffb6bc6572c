use anyhow::Result;

use crate::api::ApiClient;
use crate::config::Config;
use crate::models::SearchFilters;

pub async fn run_search(
    config: &Config,
    query: &str,
    pos: Option<String>,
    exact: bool,
    offset: i64,
    limit: i64,
) -> Result<()> {
    if query.trim().is_empty() {
        println!("No results.");
        return Ok(());
    }

    let filters = SearchFilters {
        pos,
        exact_match: exact,
    };
    let client = ApiClient::new(config, None)?;
    let results = client.search_words(query, offset, limit, &filters).await?;

    if results.hits.is_empty() {
        println!("No results.");
        return Ok(());
    }

    println!("{:<20} {:<14} DEFINITION", "WORD", "POS");
    for hit in &results.hits {
        let pos = hit.pos.join(",");
        let definition = hit.definitions.first().map(String::as_str).unwrap_or("");
        println!("{:<20} {:<14} {}", hit.word, pos, truncate(definition, 60));
    }

    println!();
    println!(
        "Showing {}-{} of {} matches.",
        results.offset + 1,
        results.offset + results.hits.len() as i64,
        results.total
    );

    Ok(())
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{cut}…")
    }
}

#[cfg(test)]
mod tests {
    use super::truncate;

    #[test]
    fn truncate_leaves_short_strings_alone() {
        assert_eq!(truncate("joyful", 60), "joyful");
    }

    #[test]
    fn truncate_respects_char_boundaries() {
        let long = "à".repeat(100);
        let cut = truncate(&long, 10);
        assert!(cut.chars().count() <= 10);
        assert!(cut.ends_with('…'));
    }
}
