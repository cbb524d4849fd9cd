use std::collections::HashMap;
use std::sync::RwLock;

/// Thread-safe pattern trie over `/`-separated paths.
///
/// Pattern levels:
/// - a literal level matches itself,
/// - `+` matches exactly one level,
/// - `#` matches every remaining level, including none. Anything after `#`
///   is ignored.
pub struct Trie<T> {
    root: RwLock<Node<T>>,
}

struct Node<T> {
    children: HashMap<String, Node<T>>,
    /// Child reached through a `+` level.
    one: Option<Box<Node<T>>>,
    /// Values whose pattern ends in `#` at this depth.
    rest: Vec<T>,
    /// Values whose pattern ends exactly here.
    here: Vec<T>,
}

impl<T> Default for Node<T> {
    fn default() -> Self {
        Self {
            children: HashMap::new(),
            one: None,
            rest: Vec::new(),
            here: Vec::new(),
        }
    }
}

impl<T: Clone> Node<T> {
    fn collect(&self, levels: &[&str], out: &mut Vec<T>) {
        out.extend(self.rest.iter().cloned());
        match levels.split_first() {
            None => out.extend(self.here.iter().cloned()),
            Some((head, tail)) => {
                if let Some(child) = self.children.get(*head) {
                    child.collect(tail, out);
                }
                if let Some(one) = &self.one {
                    one.collect(tail, out);
                }
            }
        }
    }
}

impl<T: Clone> Trie<T> {
    pub fn new() -> Self {
        Self {
            root: RwLock::new(Node::default()),
        }
    }

    /// Register `value` under `pattern`.
    pub fn insert(&self, pattern: &str, value: T) {
        let mut root = self.root.write().unwrap();
        let mut node = &mut *root;
        for level in pattern.split('/') {
            match level {
                "#" => {
                    node.rest.push(value);
                    return;
                }
                "+" => node = node.one.get_or_insert_with(Box::default).as_mut(),
                _ => node = node.children.entry(level.to_string()).or_default(),
            }
        }
        node.here.push(value);
    }

    /// All values whose pattern matches the concrete `path`.
    pub fn matches(&self, path: &str) -> Vec<T> {
        let levels: Vec<&str> = path.split('/').collect();
        let root = self.root.read().unwrap();
        let mut out = Vec::new();
        root.collect(&levels, &mut out);
        out
    }

    /// Remove the values stored under exactly `pattern` for which `pred`
    /// holds. Returns how many were removed.
    pub fn remove(&self, pattern: &str, mut pred: impl FnMut(&T) -> bool) -> usize {
        let mut root = self.root.write().unwrap();
        let mut node = &mut *root;
        for level in pattern.split('/') {
            if level == "#" {
                let before = node.rest.len();
                node.rest.retain(|v| !pred(v));
                return before - node.rest.len();
            }
            let next = if level == "+" {
                node.one.as_deref_mut()
            } else {
                node.children.get_mut(level)
            };
            match next {
                Some(child) => node = child,
                None => return 0,
            }
        }
        let before = node.here.len();
        node.here.retain(|v| !pred(v));
        before - node.here.len()
    }
}

impl<T: Clone> Default for Trie<T> {
    fn default() -> Self {
        Self::new()
    }
}
