mod compose;
mod env;
mod nginx;
