//! Asset paths used by the demo scenes

/// UI and caption font
pub const FONT: &str = "Assets/fonts/Work_Sans/static/WorkSans-Regular.ttf";

/// Button background strip
pub const BUTTON_TEXTURE: &str = "Assets/textures/UI/button.png";
/// Carousel background
pub const CAROUSEL_TEXTURE: &str = "Assets/textures/UI/carousel.png";
/// Carousel arrow buttons
pub const CAROUSEL_BUTTON_TEXTURE: &str = "Assets/textures/UI/carousel_button.png";
/// Switch background strip
pub const SWITCH_TEXTURE: &str = "Assets/textures/UI/switch.png";
/// Slider track
pub const SLIDER_TEXTURE: &str = "Assets/textures/UI/slider.png";
/// Text box background strip
pub const TEXT_BOX_TEXTURE: &str = "Assets/textures/UI/text_box.png";
/// Slider and text cursor
pub const CURSOR_TEXTURE: &str = "Assets/textures/UI/cursor.png";

/// Ember sheet, 8 frames in one row
pub const EMBER_TEXTURE: &str = "Assets/textures/ember.png";
/// Coin sprite
pub const COIN_TEXTURE: &str = "Assets/textures/coin.png";
/// Arena wall
pub const WALL_TEXTURE: &str = "Assets/textures/wall.png";
/// Player walking left/right, 4 frames
pub const PLAYER_HORIZONTAL_TEXTURE: &str = "Assets/textures/player_horizontal.png";
/// Player walking up/down, 4 frames
pub const PLAYER_VERTICAL_TEXTURE: &str = "Assets/textures/player_vertical.png";

/// Button click
pub const CLICK_SOUND: &str = "Assets/audio/click.wav";
/// Coin pickup
pub const DING_SOUND: &str = "Assets/audio/ding.wav";
/// Menu music
pub const MENU_MUSIC: &str = "Assets/audio/low_droning.wav";
/// In-game music
pub const GAME_MUSIC: &str = "Assets/audio/high_droning.wav";
