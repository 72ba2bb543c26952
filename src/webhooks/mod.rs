pub mod sonarr;
