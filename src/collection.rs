//! Orders the parsed posts for presentation and wires up each post's
//! neighbour links.

use crate::post::Post;
use std::cmp::Ordering;

/// Sorts `posts` newest first and sets every post's `prev` (next-newer) and
/// `next` (next-older) links. Posts published on the same day are ordered by
/// slug, descending, so the result doesn't depend on discovery order.
pub fn order_and_link(mut posts: Vec<Post>) -> Vec<Post> {
    posts.sort_by(newest_first);

    let links: Vec<_> = posts.iter().map(Post::link).collect();
    for (i, post) in posts.iter_mut().enumerate() {
        post.prev = match i {
            0 => None,
            _ => Some(links[i - 1].clone()),
        };
        post.next = links.get(i + 1).cloned();
    }
    posts
}

fn newest_first(a: &Post, b: &Post) -> Ordering {
    b.date.cmp(&a.date).then_with(|| b.slug.cmp(&a.slug))
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::post::PostLink;
    use chrono::NaiveDate;

    fn post(slug: &str, title: &str) -> Post {
        Post {
            slug: slug.to_owned(),
            title: title.to_owned(),
            description: String::new(),
            date: NaiveDate::parse_from_str(&slug[..10], "%Y-%m-%d").unwrap(),
            body: String::new(),
            prev: None,
            next: None,
        }
    }

    fn link(slug: &str, title: &str) -> Option<PostLink> {
        Some(PostLink {
            slug: slug.to_owned(),
            title: title.to_owned(),
        })
    }

    #[test]
    fn test_order_and_link() {
        let posts = order_and_link(vec![
            post("2024-01-01-a", "A"),
            post("2024-03-01-c", "C"),
            post("2024-02-01-b", "B"),
        ]);

        let slugs: Vec<&str> = posts.iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(vec!["2024-03-01-c", "2024-02-01-b", "2024-01-01-a"], slugs);

        assert_eq!(None, posts[0].prev);
        assert_eq!(link("2024-02-01-b", "B"), posts[0].next);
        assert_eq!(link("2024-03-01-c", "C"), posts[1].prev);
        assert_eq!(link("2024-01-01-a", "A"), posts[1].next);
        assert_eq!(link("2024-02-01-b", "B"), posts[2].prev);
        assert_eq!(None, posts[2].next);
    }

    #[test]
    fn test_links_are_consistent() {
        let posts = order_and_link(vec![
            post("2020-05-05-e", "E"),
            post("2021-01-01-x", "X"),
            post("2019-12-31-q", "Q"),
            post("2021-01-01-y", "Y"),
            post("2020-05-06-f", "F"),
        ]);

        for (i, p) in posts.iter().enumerate() {
            if i > 0 {
                assert!(posts[i - 1].date >= p.date);
                assert_eq!(Some(posts[i - 1].link()), p.prev);
            } else {
                assert_eq!(None, p.prev);
            }
            match posts.get(i + 1) {
                Some(older) => assert_eq!(Some(older.link()), p.next),
                None => assert_eq!(None, p.next),
            }
        }
    }

    #[test]
    fn test_same_day_ties_break_on_slug() {
        let (a, b) = (post("2021-01-01-a", "A"), post("2021-01-01-b", "B"));
        let forward = order_and_link(vec![a.clone(), b.clone()]);
        let backward = order_and_link(vec![b, a]);
        assert_eq!(forward, backward);
        assert_eq!("2021-01-01-b", forward[0].slug);
    }

    #[test]
    fn test_single_post_has_no_links() {
        let posts = order_and_link(vec![post("2021-01-01-only", "Only")]);
        assert_eq!(None, posts[0].prev);
        assert_eq!(None, posts[0].next);
    }

    #[test]
    fn test_empty() {
        assert!(order_and_link(Vec::new()).is_empty());
    }
}
