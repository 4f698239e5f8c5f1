mod settings_dto;

pub use settings_dto::{
    ChangePasswordDto, IconResponseDto, ProfileResponseDto, UpdateIconDto, UpdateProfileDto,
};
