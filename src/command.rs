//! Command tree and the paths used to address nodes in it.

use crate::env::Env;
use crate::flags::{Flag, FlagSet};
use std::fmt;
use std::sync::Arc;

/// Executes a command with its remaining arguments.
pub trait Runner: Send + Sync {
    fn run(&self, env: &Env, args: &[String]) -> anyhow::Result<()>;
}

/// A help topic attached to a command.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Topic {
    pub name: String,
    pub short: String,
    pub long: String,
}

impl Topic {
    pub fn new(name: impl Into<String>, short: impl Into<String>, long: impl Into<String>) -> Self {
        Topic {
            name: name.into(),
            short: short.into(),
            long: long.into(),
        }
    }
}

/// A node in the command tree. Built once by the application and shared
/// read-only afterwards.
#[derive(Clone, Default)]
pub struct Command {
    pub name: String,
    pub short: String,
    pub long: String,
    pub flags: FlagSet,
    pub children: Vec<Arc<Command>>,
    pub topics: Vec<Topic>,
    pub args_name: String,
    pub args_long: String,
    /// Also document `<name>-<sub>` executables found on `PATH`.
    pub look_path: bool,
    pub runner: Option<Arc<dyn Runner>>,
}

impl Command {
    pub fn new(name: impl Into<String>, short: impl Into<String>) -> Self {
        Command {
            name: name.into(),
            short: short.into(),
            ..Command::default()
        }
    }

    pub fn long(mut self, long: impl Into<String>) -> Self {
        self.long = long.into();
        self
    }

    pub fn child(mut self, child: Command) -> Self {
        self.children.push(Arc::new(child));
        self
    }

    pub fn topic(mut self, topic: Topic) -> Self {
        self.topics.push(topic);
        self
    }

    pub fn flag(mut self, flag: Flag) -> Self {
        self.flags.insert(flag);
        self
    }

    pub fn args(mut self, name: impl Into<String>, long: impl Into<String>) -> Self {
        self.args_name = name.into();
        self.args_long = long.into();
        self
    }

    pub fn look_path(mut self, look_path: bool) -> Self {
        self.look_path = look_path;
        self
    }

    pub fn runner(mut self, runner: Arc<dyn Runner>) -> Self {
        self.runner = Some(runner);
        self
    }

    pub fn is_runnable(&self) -> bool {
        self.runner.is_some()
    }

    pub fn find_child(&self, name: &str) -> Option<&Arc<Command>> {
        self.children.iter().find(|child| child.name == name)
    }

    pub fn find_topic(&self, name: &str) -> Option<&Topic> {
        self.topics.iter().find(|topic| topic.name == name)
    }
}

impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Command")
            .field("name", &self.name)
            .field("short", &self.short)
            .field("children", &self.children)
            .field("topics", &self.topics)
            .field("look_path", &self.look_path)
            .field("runnable", &self.is_runnable())
            .finish_non_exhaustive()
    }
}

/// Non-empty sequence of commands from the root to a target node.
///
/// Appending returns a new path, so sibling recursions never share state.
#[derive(Clone, Debug)]
pub struct CommandPath {
    nodes: Vec<Arc<Command>>,
}

impl CommandPath {
    pub fn root(root: Arc<Command>) -> Self {
        CommandPath { nodes: vec![root] }
    }

    pub fn join(&self, child: Arc<Command>) -> Self {
        let mut nodes = self.nodes.clone();
        nodes.push(child);
        CommandPath { nodes }
    }

    /// The target command.
    pub fn last(&self) -> &Command {
        // Paths are created non-empty and only grow.
        &self.nodes[self.nodes.len() - 1]
    }

    pub fn parent(&self) -> Option<CommandPath> {
        (self.nodes.len() > 1).then(|| CommandPath {
            nodes: self.nodes[..self.nodes.len() - 1].to_vec(),
        })
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Command> {
        self.nodes.iter().map(|node| node.as_ref())
    }

    /// Space-separated command names, after `prefix` when it is non-empty.
    pub fn name(&self, prefix: &str) -> String {
        let mut name = prefix.to_string();
        for node in &self.nodes {
            if !name.is_empty() {
                name.push(' ');
            }
            name.push_str(&node.name);
        }
        name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree() -> Arc<Command> {
        Arc::new(
            Command::new("root", "the root")
                .child(Command::new("build", "compile").child(Command::new("all", "everything")))
                .topic(Topic::new("env", "environment", "Environment variables.")),
        )
    }

    #[test]
    fn path_names_join_with_spaces_and_prefix() {
        let root = tree();
        let build = Arc::clone(root.find_child("build").unwrap());
        let all = Arc::clone(build.find_child("all").unwrap());
        let path = CommandPath::root(root).join(build).join(all);
        assert_eq!(path.name(""), "root build all");
        assert_eq!(path.name("parent"), "parent root build all");
        assert_eq!(path.last().name, "all");
        assert_eq!(path.parent().unwrap().name(""), "root build");
    }

    #[test]
    fn join_leaves_the_original_path_untouched() {
        let root = tree();
        let base = CommandPath::root(Arc::clone(&root));
        let child = base.join(Arc::clone(root.find_child("build").unwrap()));
        assert_eq!(base.len(), 1);
        assert_eq!(child.len(), 2);
        assert!(base.parent().is_none());
    }

    #[test]
    fn lookups_by_name() {
        let root = tree();
        assert!(root.find_child("missing").is_none());
        assert_eq!(root.find_topic("env").unwrap().short, "environment");
        assert!(!root.is_runnable());
    }
}
