mod episode_repo;
mod source_repo;
mod stats_repo;
mod title_repo;

pub use episode_repo::EpisodeRepo;
pub use source_repo::SourceRepo;
pub use stats_repo::StatsRepo;
pub use title_repo::TitleRepo;
