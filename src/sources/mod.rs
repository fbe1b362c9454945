pub mod asurascans;
