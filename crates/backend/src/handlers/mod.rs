pub mod a001_taxonomy;
pub mod a002_profile;
pub mod a003_profile_draft;
pub mod lookup;
