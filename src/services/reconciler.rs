use std::collections::HashSet;

use crate::models::{Podcast, PodcastRecommendation};

/// Matches recommended titles back to podcast records
///
/// Output follows the order of `candidates`, not of `recommended_titles`.
/// Titles are compared exactly; titles with no matching podcast are dropped.
/// When several podcasts share a title only the first one is returned.
pub fn reconcile(
    candidates: &[Podcast],
    favourite_ids: &HashSet<i64>,
    recommended_titles: &[String],
) -> Vec<PodcastRecommendation> {
    let wanted: HashSet<&str> = recommended_titles.iter().map(String::as_str).collect();
    let mut matched_titles: HashSet<&str> = HashSet::new();
    let mut recommendations = Vec::new();

    for podcast in candidates {
        let title = podcast.title.as_str();
        if wanted.contains(title) && matched_titles.insert(title) {
            recommendations.push(PodcastRecommendation::from_podcast(
                podcast,
                favourite_ids.contains(&podcast.id),
            ));
        }
    }

    recommendations
}
