//! Frontier and visited-set bookkeeping for a single crawl run

use crate::config::Traversal;
use crate::state::PageState;
use std::collections::{HashMap, HashSet, VecDeque};
use url::Url;

/// Working state owned by one crawl call
///
/// * frontier: URLs known but not yet fetched, without duplicates
/// * visited: every URL a fetch was issued for, with its current state;
///   entries are never removed
/// * discovered: every same-origin link target seen on a fetched page
#[derive(Debug)]
pub struct CrawlState {
    traversal: Traversal,
    frontier: VecDeque<Url>,
    queued: HashSet<Url>,
    visited: HashMap<Url, PageState>,
    discovered: HashSet<Url>,
}

impl CrawlState {
    /// Creates the initial state: frontier = {seed}, everything else empty
    pub fn new(seed: Url, traversal: Traversal) -> Self {
        let mut state = Self {
            traversal,
            frontier: VecDeque::new(),
            queued: HashSet::new(),
            visited: HashMap::new(),
            discovered: HashSet::new(),
        };
        state.enqueue(seed);
        state
    }

    /// Takes the next unvisited URL off the frontier and marks it visited
    ///
    /// Entries that were visited since they were queued are dropped. The
    /// check and the mark happen in one call so a URL can be handed out at
    /// most once per run.
    pub fn next_unvisited(&mut self) -> Option<Url> {
        loop {
            let url = match self.traversal {
                Traversal::BreadthFirst => self.frontier.pop_front(),
                Traversal::DepthFirst => self.frontier.pop_back(),
            }?;
            self.queued.remove(&url);

            if self.visited.contains_key(&url) {
                continue;
            }

            self.visited.insert(url.clone(), PageState::Fetching);
            return Some(url);
        }
    }

    /// Records the outcome of a fetch for a visited URL
    ///
    /// URLs that were never handed out are ignored.
    pub fn complete(&mut self, url: &Url, state: PageState) {
        if let Some(current) = self.visited.get_mut(url) {
            *current = state;
        }
    }

    /// Merges the links found on a fetched page
    ///
    /// All links join the discovered set; the ones not yet visited or
    /// queued join the frontier.
    pub fn record_links<I>(&mut self, links: I)
    where
        I: IntoIterator<Item = Url>,
    {
        for link in links {
            if !self.visited.contains_key(&link) && !self.queued.contains(&link) {
                self.enqueue(link.clone());
            }
            self.discovered.insert(link);
        }
    }

    fn enqueue(&mut self, url: Url) {
        self.queued.insert(url.clone());
        self.frontier.push_back(url);
    }

    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }

    pub fn frontier_size(&self) -> usize {
        self.frontier.len()
    }

    pub fn is_visited(&self, url: &Url) -> bool {
        self.visited.contains_key(url)
    }

    /// Current state of `url`: its visited state, or Queued while it waits
    /// in the frontier
    pub fn state_of(&self, url: &Url) -> Option<PageState> {
        match self.visited.get(url) {
            Some(state) => Some(*state),
            None if self.queued.contains(url) => Some(PageState::Queued),
            None => None,
        }
    }

    /// Marks every fetch that never reported back as Failed
    ///
    /// Returns how many entries were changed.
    pub fn fail_unfinished(&mut self) -> usize {
        let mut changed = 0;
        for state in self.visited.values_mut() {
            if !state.is_terminal() {
                *state = PageState::Failed;
                changed += 1;
            }
        }
        changed
    }

    pub fn discovered(&self) -> &HashSet<Url> {
        &self.discovered
    }

    /// Consumes the state, returning (visited, discovered)
    pub fn into_parts(self) -> (HashMap<Url, PageState>, HashSet<Url>) {
        (self.visited, self.discovered)
    }
}
