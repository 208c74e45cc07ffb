mod params;
mod property;
mod render;
