//! Static in-memory hero catalog
//!
//! Five fixed pages of three heroes each, built once at startup.

use super::{Hero, HeroRepository};

const CATALOG: [[(i32, &str); 3]; 5] = [
    [(1, "Sasuke"), (2, "Naruto"), (3, "Sakura")],
    [(4, "Boruto"), (5, "Sarada"), (6, "Mitsuki")],
    [(7, "Kawaki"), (8, "Orochimaru"), (9, "Kakashi")],
    [(10, "Hinata"), (11, "Himawari"), (12, "Konohamaru")],
    [(13, "Jigen"), (14, "Isshiki"), (15, "Momoshiki")],
];

/// Hero repository backed by the compiled-in catalog
#[derive(Debug, Clone)]
pub struct StaticHeroRepository {
    pages: Vec<Vec<Hero>>,
}

impl StaticHeroRepository {
    pub fn new() -> Self {
        let pages = CATALOG
            .iter()
            .map(|page| page.iter().map(|&(id, name)| Hero::new(id, name)).collect())
            .collect();
        Self { pages }
    }

    /// All heroes in catalog order
    fn all(&self) -> impl Iterator<Item = &Hero> {
        self.pages.iter().flatten()
    }
}

impl Default for StaticHeroRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl HeroRepository for StaticHeroRepository {
    fn page_count(&self) -> i32 {
        i32::try_from(self.pages.len()).unwrap_or(i32::MAX)
    }

    fn page(&self, page: i32) -> Option<&[Hero]> {
        let index = usize::try_from(page).ok()?.checked_sub(1)?;
        self.pages.get(index).map(Vec::as_slice)
    }

    fn search(&self, query: &str) -> Vec<Hero> {
        if query.is_empty() {
            return Vec::new();
        }
        let needle = query.to_lowercase();
        self.all()
            .filter(|hero| hero.name.to_lowercase().contains(&needle))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(heroes: &[Hero]) -> Vec<&str> {
        heroes.iter().map(|h| h.name.as_str()).collect()
    }

    #[test]
    fn test_five_pages_of_three() {
        let repo = StaticHeroRepository::new();
        assert_eq!(repo.page_count(), 5);
        for page in 1..=5 {
            assert_eq!(repo.page(page).map(<[Hero]>::len), Some(3), "page {page}");
        }
    }

    #[test]
    fn test_page_out_of_range() {
        let repo = StaticHeroRepository::new();
        assert!(repo.page(0).is_none());
        assert!(repo.page(6).is_none());
        assert!(repo.page(-1).is_none());
        assert!(repo.page(i32::MIN).is_none());
    }

    #[test]
    fn test_pages_do_not_overlap() {
        let repo = StaticHeroRepository::new();
        let mut ids: Vec<i32> = (1..=5)
            .flat_map(|p| repo.page(p).unwrap_or_default().iter().map(|h| h.id))
            .collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids, (1..=15).collect::<Vec<_>>());
    }

    #[test]
    fn test_hero_image_url() {
        let repo = StaticHeroRepository::new();
        let first = &repo.page(1).unwrap()[0];
        assert_eq!(first.id, 1);
        assert_eq!(first.name, "Sasuke");
        assert_eq!(first.image, "/images/sasuke.jpg");
    }

    #[test]
    fn test_search_substring() {
        let repo = StaticHeroRepository::new();
        assert_eq!(names(&repo.search("sas")), vec!["Sasuke"]);
        assert_eq!(names(&repo.search("sa")), vec!["Sasuke", "Sakura", "Sarada"]);
    }

    #[test]
    fn test_search_ignores_case() {
        let repo = StaticHeroRepository::new();
        assert_eq!(names(&repo.search("SAS")), vec!["Sasuke"]);
        assert_eq!(names(&repo.search("KaKa")), vec!["Kakashi"]);
    }

    #[test]
    fn test_search_spans_pages() {
        let repo = StaticHeroRepository::new();
        // Mitsuki on page 2, Kawaki on page 3, Isshiki and Momoshiki on page 5
        assert_eq!(
            names(&repo.search("ki")),
            vec!["Mitsuki", "Kawaki", "Isshiki", "Momoshiki"]
        );
    }

    #[test]
    fn test_search_empty_and_unmatched() {
        let repo = StaticHeroRepository::new();
        assert!(repo.search("").is_empty());
        assert!(repo.search("zzz").is_empty());
    }
}
