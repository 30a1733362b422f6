use crate::error::{ReleaseError, Result};
use git2::Repository as Git2Repo;
use std::path::Path;

/// Wrapper around git2::Repository with our trait interface
pub struct Git2Repository {
    repo: Git2Repo,
}

impl Git2Repository {
    /// Open or discover a git repository
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Git2Repo::discover(path)?;

        Ok(Git2Repository { repo })
    }

    /// Create from existing git2::Repository
    pub fn from_git2(repo: Git2Repo) -> Self {
        Git2Repository { repo }
    }

    /// Branch HEAD points at before its first commit
    fn unborn_branch(&self) -> Result<String> {
        let head = self.repo.find_reference("HEAD")?;
        let target = head
            .symbolic_target()
            .ok_or_else(|| ReleaseError::config("HEAD does not name a branch"))?;
        Ok(target.strip_prefix("refs/heads/").unwrap_or(target).to_string())
    }
}

impl super::Repository for Git2Repository {
    fn current_branch(&self) -> Result<String> {
        let head = match self.repo.head() {
            Ok(head) => head,
            // No commits yet, but HEAD still names the branch to be born.
            Err(e) if e.code() == git2::ErrorCode::UnbornBranch => {
                return self.unborn_branch();
            }
            Err(e) => return Err(ReleaseError::config(format!("Cannot read HEAD: {}", e))),
        };

        if !head.is_branch() {
            return Err(ReleaseError::config(
                "HEAD is detached, check out a branch or pass --branch",
            ));
        }

        head.shorthand()
            .map(|name| name.to_string())
            .ok_or_else(|| ReleaseError::config("Branch name is not valid UTF-8"))
    }

    fn head_commit_hash(&self) -> Result<String> {
        let commit = self
            .repo
            .head()
            .and_then(|head| head.peel_to_commit())
            .map_err(|e| ReleaseError::commit_hash(format!("Cannot resolve HEAD commit: {}", e)))?;

        Ok(commit.id().to_string())
    }

    fn list_tags(&self) -> Result<Vec<String>> {
        let tags = self.repo.tag_names(None)?;

        Ok(tags.iter().flatten().map(|s| s.to_string()).collect())
    }

    fn is_gitflow_initialized(&self) -> Result<bool> {
        let config = self.repo.config()?;
        match config.get_string("gitflow.branch.master") {
            Ok(_) => Ok(true),
            Err(e) if e.code() == git2::ErrorCode::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::Repository;
    use tempfile::TempDir;

    fn init_repo() -> (TempDir, Git2Repo) {
        let dir = TempDir::new().unwrap();
        let repo = Git2Repo::init(dir.path()).unwrap();
        {
            let mut config = repo.config().unwrap();
            config.set_str("user.name", "Release Bot").unwrap();
            config.set_str("user.email", "release@example.com").unwrap();
        }
        (dir, repo)
    }

    fn commit(repo: &Git2Repo, message: &str) -> git2::Oid {
        let sig = repo.signature().unwrap();
        let tree_id = repo.index().unwrap().write_tree().unwrap();
        let tree = repo.find_tree(tree_id).unwrap();
        let parent = repo.head().ok().and_then(|h| h.peel_to_commit().ok());
        let parents: Vec<&git2::Commit> = parent.iter().collect();
        repo.commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
            .unwrap()
    }

    #[test]
    fn test_unborn_head_has_no_commit() {
        let (_dir, repo) = init_repo();
        let repo = Git2Repository::from_git2(repo);
        assert!(matches!(
            repo.head_commit_hash(),
            Err(ReleaseError::CommitHashUnavailable(_))
        ));
    }

    #[test]
    fn test_unborn_head_names_branch() {
        let (_dir, repo) = init_repo();
        repo.set_head("refs/heads/develop").unwrap();
        let repo = Git2Repository::from_git2(repo);

        assert_eq!(repo.current_branch().unwrap(), "develop");
        assert!(repo.head_commit_hash().is_err());
    }

    #[test]
    fn test_branch_hash_and_tags() {
        let (dir, repo) = init_repo();
        let oid = commit(&repo, "initial");
        let head_commit = repo.find_commit(oid).unwrap();
        repo.branch("develop", &head_commit, false).unwrap();
        repo.set_head("refs/heads/develop").unwrap();
        repo.tag_lightweight("v1.0.0", head_commit.as_object(), false)
            .unwrap();

        let repo = Git2Repository::open(dir.path()).unwrap();
        assert_eq!(repo.current_branch().unwrap(), "develop");
        assert_eq!(repo.head_commit_hash().unwrap(), oid.to_string());
        assert_eq!(repo.list_tags().unwrap(), vec!["v1.0.0".to_string()]);
    }

    #[test]
    fn test_gitflow_detection() {
        let (_dir, repo) = init_repo();
        let repo = Git2Repository::from_git2(repo);
        assert!(!repo.is_gitflow_initialized().unwrap());

        repo.repo
            .config()
            .unwrap()
            .set_str("gitflow.branch.master", "master")
            .unwrap();
        assert!(repo.is_gitflow_initialized().unwrap());
    }
}
