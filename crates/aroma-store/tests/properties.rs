//! Behavioral properties every repository honors, whichever variant backs it.

mod common;

use std::collections::BTreeSet;

use aroma_shared::{Application, LengthOfTime, Message, User};
use aroma_store::StoreError;

use common::{
    variants, APP_ID, MESSAGE_ID, MISSING_ID, ORG_ID, OWNER_ID, START, TOKEN_ID, USER_ID,
};

const SECOND_OWNER: &str = "88888888-8888-8888-8888-888888888888";

fn invalid<T: std::fmt::Debug>(result: Result<T, StoreError>) -> bool {
    matches!(result, Err(StoreError::InvalidArgument(_)))
}

#[test]
fn saved_entities_are_contained_and_equal() {
    for v in variants() {
        let r = &v.repos;

        let app = common::full_application();
        r.applications.save_application(&app).unwrap();
        assert!(r.applications.contains_application(APP_ID).unwrap());
        assert_eq!(r.applications.get_by_id(APP_ID).unwrap(), app, "{}", v.name);

        let user = common::user(USER_ID);
        r.users.save_user(&user).unwrap();
        assert!(r.users.contains_user(USER_ID).unwrap());
        assert_eq!(r.users.get_user(USER_ID).unwrap(), user, "{}", v.name);

        let org = common::organization();
        r.organizations.save_organization(&org).unwrap();
        assert!(r.organizations.contains_organization(ORG_ID).unwrap());
        assert_eq!(r.organizations.get_organization(ORG_ID).unwrap(), org, "{}", v.name);

        let message = common::message(MESSAGE_ID);
        r.messages.save_message(&message, None).unwrap();
        assert!(r.messages.contains_message(APP_ID, MESSAGE_ID).unwrap());
        assert_eq!(r.messages.get_message(APP_ID, MESSAGE_ID).unwrap(), message, "{}", v.name);

        let token = common::token();
        r.tokens.save_token(&token).unwrap();
        assert!(r.tokens.contains_token(TOKEN_ID).unwrap());
        assert_eq!(r.tokens.get_token(TOKEN_ID).unwrap(), token, "{}", v.name);
    }
}

#[test]
fn upper_case_ids_read_back_canonical() {
    for v in variants() {
        let mut app = common::application();
        app.application_id = APP_ID.to_uppercase();
        v.repos.applications.save_application(&app).unwrap();

        let loaded = v.repos.applications.get_by_id(APP_ID).unwrap();
        assert_eq!(loaded.application_id, APP_ID, "{}", v.name);
        assert!(v.repos.applications.contains_application(&APP_ID.to_uppercase()).unwrap());
    }
}

#[test]
fn contains_never_reports_missing() {
    for v in variants() {
        let r = &v.repos;
        assert!(!r.applications.contains_application(MISSING_ID).unwrap());
        assert!(!r.users.contains_user(MISSING_ID).unwrap());
        assert!(!r.organizations.contains_organization(MISSING_ID).unwrap());
        assert!(!r.messages.contains_message(APP_ID, MISSING_ID).unwrap());
        assert!(!r.tokens.contains_token(MISSING_ID).unwrap());
        assert!(!r.media.contains_media(MISSING_ID).unwrap());
        assert!(!r.activity.contains_event(USER_ID, MISSING_ID).unwrap());
        assert!(!r.credentials.contains_encrypted_password(MISSING_ID).unwrap());
        assert!(!r.followers.following_exists(MISSING_ID, APP_ID).unwrap());
    }
}

#[test]
fn deleted_entities_are_gone() {
    for v in variants() {
        let r = &v.repos;

        r.applications.save_application(&common::application()).unwrap();
        r.applications.delete_application(APP_ID).unwrap();
        assert!(!r.applications.contains_application(APP_ID).unwrap());

        r.users.save_user(&common::user(USER_ID)).unwrap();
        r.users.delete_user(USER_ID).unwrap();
        assert!(!r.users.contains_user(USER_ID).unwrap());
        assert!(r.users.get_user_by_email("55555555@example.com").is_err());

        r.organizations.save_organization(&common::organization()).unwrap();
        r.organizations.delete_organization(ORG_ID).unwrap();
        assert!(!r.organizations.contains_organization(ORG_ID).unwrap());

        r.messages.save_message(&common::message(MESSAGE_ID), None).unwrap();
        r.messages.delete_message(APP_ID, MESSAGE_ID).unwrap();
        assert!(!r.messages.contains_message(APP_ID, MESSAGE_ID).unwrap());

        r.tokens.save_token(&common::token()).unwrap();
        r.tokens.delete_token(TOKEN_ID).unwrap();
        assert!(!r.tokens.contains_token(TOKEN_ID).unwrap());
    }
}

#[test]
fn deleting_what_was_never_saved_fails() {
    for v in variants() {
        let r = &v.repos;
        assert!(matches!(
            r.applications.delete_application(MISSING_ID),
            Err(StoreError::ApplicationDoesNotExist(_))
        ));
        assert!(matches!(
            r.users.delete_user(MISSING_ID),
            Err(StoreError::UserDoesNotExist(_))
        ));
        assert!(matches!(
            r.organizations.delete_organization(MISSING_ID),
            Err(StoreError::OrganizationDoesNotExist(_))
        ));
        assert!(matches!(
            r.messages.delete_message(APP_ID, MISSING_ID),
            Err(StoreError::MessageDoesNotExist(_))
        ));
        assert!(matches!(
            r.tokens.delete_token(MISSING_ID),
            Err(StoreError::InvalidCredentials(_))
        ));
    }
}

#[test]
fn invalid_ids_are_rejected_everywhere() {
    for v in variants() {
        let r = &v.repos;
        for bad in ["", "  ", "not-a-uuid"] {
            assert!(invalid(r.applications.get_by_id(bad)), "{} {bad:?}", v.name);
            assert!(invalid(r.applications.contains_application(bad)));
            assert!(invalid(r.applications.delete_application(bad)));
            assert!(invalid(r.applications.get_applications_owned_by(bad)));
            assert!(invalid(r.applications.get_applications_by_org(bad)));
            assert!(invalid(r.users.get_user(bad)));
            assert!(invalid(r.users.contains_user(bad)));
            assert!(invalid(r.organizations.get_organization(bad)));
            assert!(invalid(r.organizations.get_organization_members(bad)));
            assert!(invalid(r.messages.get_message(APP_ID, bad)));
            assert!(invalid(r.messages.get_by_application(bad, None)));
            assert!(invalid(r.messages.delete_all_messages(bad)));
            assert!(invalid(r.inbox.get_messages_for_user(bad)));
            assert!(invalid(r.inbox.delete_all_messages_for_user(bad)));
            assert!(invalid(r.followers.get_applications_followed_by(bad)));
            assert!(invalid(r.followers.get_application_followers(bad)));
            assert!(invalid(r.tokens.get_token(bad)));
            assert!(invalid(r.tokens.get_tokens_belonging_to(bad)));
            assert!(invalid(r.activity.get_all_events_for(bad)));
            assert!(invalid(r.media.get_media(bad)));
            assert!(invalid(r.reactions.get_reactions_for_user(bad)));
            assert!(invalid(r.credentials.get_encrypted_password(bad)));
            assert!(invalid(r.preferences.get_mobile_devices(bad)));
        }
    }
}

#[test]
fn saving_twice_is_saving_once() {
    for v in variants() {
        let r = &v.repos;
        let app = common::full_application();
        r.applications.save_application(&app).unwrap();
        r.applications.save_application(&app).unwrap();

        assert_eq!(r.applications.get_applications_owned_by(OWNER_ID).unwrap(), vec![app.clone()]);
        assert_eq!(r.applications.get_applications_by_org(ORG_ID).unwrap(), vec![app.clone()]);
        assert_eq!(r.applications.get_recently_created().unwrap(), vec![app], "{}", v.name);

        let user = common::user(USER_ID);
        r.users.save_user(&user).unwrap();
        r.users.save_user(&user).unwrap();
        assert_eq!(r.users.get_recently_created_users().unwrap(), vec![user]);
    }
}

#[test]
fn projections_follow_every_owner_and_org() {
    for v in variants() {
        let r = &v.repos;
        let app = Application {
            owners: BTreeSet::from([OWNER_ID.to_string(), SECOND_OWNER.to_string()]),
            ..common::full_application()
        };
        r.applications.save_application(&app).unwrap();

        for owner in &app.owners {
            assert_eq!(r.applications.get_applications_owned_by(owner).unwrap(), vec![app.clone()]);
        }
        assert_eq!(r.applications.get_applications_by_org(ORG_ID).unwrap(), vec![app.clone()]);

        let reassigned = Application {
            owners: BTreeSet::from([SECOND_OWNER.to_string()]),
            organization_id: None,
            ..app
        };
        r.applications.save_application(&reassigned).unwrap();

        assert!(r.applications.get_applications_owned_by(OWNER_ID).unwrap().is_empty(), "{}", v.name);
        assert!(r.applications.get_applications_by_org(ORG_ID).unwrap().is_empty(), "{}", v.name);
        assert_eq!(r.applications.get_applications_owned_by(SECOND_OWNER).unwrap(), vec![reassigned]);
    }
}

#[test]
fn deleted_application_leaves_no_projection() {
    for v in variants() {
        let r = &v.repos;
        r.applications.save_application(&common::full_application()).unwrap();
        r.applications.delete_application(APP_ID).unwrap();

        assert!(r.applications.get_applications_owned_by(OWNER_ID).unwrap().is_empty());
        assert!(r.applications.get_applications_by_org(ORG_ID).unwrap().is_empty());
        assert!(r.applications.get_recently_created().unwrap().is_empty());
        assert!(r.applications.search_by_name("canary").unwrap().is_empty(), "{}", v.name);
    }
}

#[test]
fn expired_messages_disappear_from_every_read() {
    for v in variants() {
        let r = &v.repos;
        r.messages
            .save_message(&common::message(MESSAGE_ID), Some(&LengthOfTime::minutes(5)))
            .unwrap();

        v.clock.advance_secs(5 * 60 - 1);
        assert_eq!(r.messages.get_count_by_application(APP_ID).unwrap(), 1);

        v.clock.advance_secs(1);
        assert!(!r.messages.contains_message(APP_ID, MESSAGE_ID).unwrap(), "{}", v.name);
        assert!(r.messages.get_message(APP_ID, MESSAGE_ID).is_err());
        assert!(r.messages.get_by_application(APP_ID, None).unwrap().is_empty());
        assert!(r.messages.get_by_hostname("db-1").unwrap().is_empty());
        assert!(r.messages.get_by_title(APP_ID, "Disk almost full").unwrap().is_empty());
        assert_eq!(r.messages.get_count_by_application(APP_ID).unwrap(), 0);
    }
}

#[test]
fn tokens_expire_at_their_expiration() {
    for v in variants() {
        let r = &v.repos;
        r.tokens.save_token(&common::token()).unwrap();

        v.clock.advance_secs(3_600);
        assert!(!r.tokens.contains_token(TOKEN_ID).unwrap(), "{}", v.name);
        assert!(matches!(
            r.tokens.get_token(TOKEN_ID),
            Err(StoreError::InvalidCredentials(_))
        ));
        assert!(r.tokens.get_tokens_belonging_to(APP_ID).unwrap().is_empty());
    }
}

#[test]
fn follower_relation_is_visible_from_both_sides() {
    for v in variants() {
        let r = &v.repos;
        let user = common::user(USER_ID);
        let app = common::application();
        r.followers.save_following(&user, &app).unwrap();

        assert_eq!(r.followers.get_applications_followed_by(USER_ID).unwrap(), vec![app]);
        assert_eq!(r.followers.get_application_followers(APP_ID).unwrap(), vec![user]);

        r.followers.delete_following(USER_ID, APP_ID).unwrap();
        assert!(!r.followers.following_exists(USER_ID, APP_ID).unwrap(), "{}", v.name);
        assert!(r.followers.get_application_followers(APP_ID).unwrap().is_empty());
    }
}

#[test]
fn user_lookups() {
    for v in variants() {
        let r = &v.repos;
        let mut user = common::user(USER_ID);
        r.users.save_user(&user).unwrap();

        assert_eq!(r.users.get_user_by_email("55555555@example.com").unwrap(), user);
        assert_eq!(r.users.find_by_github_profile("gh-55555555").unwrap(), user);

        user.email = Some("grace@navy.example".into());
        r.users.save_user(&user).unwrap();
        assert!(matches!(
            r.users.get_user_by_email("55555555@example.com"),
            Err(StoreError::UserDoesNotExist(_))
        ), "{}", v.name);
        assert_eq!(r.users.get_user_by_email("grace@navy.example").unwrap(), user);
    }
}

#[test]
fn messages_are_listed_newest_first() {
    for v in variants() {
        let r = &v.repos;
        for (offset, id) in [(0, MESSAGE_ID), (20, TOKEN_ID), (10, MISSING_ID)] {
            let mut message = common::message(id);
            message.time_of_creation = Some(START + offset);
            r.messages.save_message(&message, None).unwrap();
        }

        let ids: Vec<String> = r
            .messages
            .get_by_application(APP_ID, Some(2))
            .unwrap()
            .into_iter()
            .map(|m| m.message_id)
            .collect();
        assert_eq!(ids, vec![TOKEN_ID, MISSING_ID], "{}", v.name);

        r.messages.delete_all_messages(APP_ID).unwrap();
        assert_eq!(r.messages.get_count_by_application(APP_ID).unwrap(), 0);
    }
}

#[test]
fn message_host_change_moves_the_host_projection() {
    for v in variants() {
        let r = &v.repos;
        let mut message = common::message(MESSAGE_ID);
        r.messages.save_message(&message, None).unwrap();

        message.hostname = Some("db-2".into());
        r.messages.save_message(&message, None).unwrap();

        assert!(r.messages.get_by_hostname("db-1").unwrap().is_empty(), "{}", v.name);
        assert_eq!(r.messages.get_by_hostname("db-2").unwrap(), vec![message.clone()]);

        r.messages.delete_message(APP_ID, MESSAGE_ID).unwrap();
        assert!(r.messages.get_by_hostname("db-2").unwrap().is_empty(), "{}", v.name);
        assert_eq!(r.messages.get_count_by_application(APP_ID).unwrap(), 0);
    }
}

#[test]
fn one_message_id_under_two_applications() {
    for v in variants() {
        let r = &v.repos;
        let first = common::message(MESSAGE_ID);
        let second = Message {
            application_id: MISSING_ID.into(),
            ..first.clone()
        };
        r.messages.save_message(&first, None).unwrap();
        r.messages.save_message(&second, None).unwrap();

        assert!(r.messages.contains_message(APP_ID, MESSAGE_ID).unwrap(), "{}", v.name);
        assert!(r.messages.contains_message(MISSING_ID, MESSAGE_ID).unwrap(), "{}", v.name);
        assert_eq!(r.messages.get_count_by_application(APP_ID).unwrap(), 1, "{}", v.name);
        assert_eq!(r.messages.get_by_hostname("db-1").unwrap().len(), 2, "{}", v.name);

        r.messages.delete_message(APP_ID, MESSAGE_ID).unwrap();
        assert!(!r.messages.contains_message(APP_ID, MESSAGE_ID).unwrap(), "{}", v.name);
        assert_eq!(r.messages.get_message(MISSING_ID, MESSAGE_ID).unwrap(), second);
        assert_eq!(r.messages.get_by_application(MISSING_ID, None).unwrap(), vec![second.clone()]);
        assert_eq!(r.messages.get_by_hostname("db-1").unwrap(), vec![second], "{}", v.name);
    }
}

#[test]
fn token_owner_change_moves_the_owner_projection() {
    for v in variants() {
        let r = &v.repos;
        let mut token = common::token();
        r.tokens.save_token(&token).unwrap();

        token.owner_id = OWNER_ID.into();
        r.tokens.save_token(&token).unwrap();

        assert!(r.tokens.get_tokens_belonging_to(APP_ID).unwrap().is_empty(), "{}", v.name);
        assert_eq!(r.tokens.get_tokens_belonging_to(OWNER_ID).unwrap(), vec![token.clone()]);

        r.tokens.delete_tokens(APP_ID).unwrap();
        assert!(r.tokens.contains_token(TOKEN_ID).unwrap(), "{}", v.name);

        r.tokens.delete_tokens(OWNER_ID).unwrap();
        assert!(!r.tokens.contains_token(TOKEN_ID).unwrap(), "{}", v.name);
    }
}

#[test]
fn shared_email_resolves_to_the_last_writer() {
    for v in variants() {
        let r = &v.repos;
        let shared = Some("ops@example.com".to_string());
        let first = User { email: shared.clone(), ..common::user(USER_ID) };
        let second = User { email: shared, ..common::user(OWNER_ID) };
        r.users.save_user(&first).unwrap();
        r.users.save_user(&second).unwrap();

        assert_eq!(r.users.get_user_by_email("ops@example.com").unwrap(), second, "{}", v.name);

        r.users.delete_user(USER_ID).unwrap();
        assert_eq!(r.users.get_user_by_email("ops@example.com").unwrap(), second, "{}", v.name);

        r.users.delete_user(OWNER_ID).unwrap();
        assert!(matches!(
            r.users.get_user_by_email("ops@example.com"),
            Err(StoreError::UserDoesNotExist(_))
        ), "{}", v.name);
    }
}
